pub use self::{hint::*, level::*, rules::*, session::*};

pub(crate) mod hint;
pub(crate) mod level;
pub(crate) mod rules;
pub(crate) mod session;
