pub use self::{heatmap::*, touch::*, zone::*};

pub(crate) mod heatmap;
pub(crate) mod touch;
pub(crate) mod zone;
