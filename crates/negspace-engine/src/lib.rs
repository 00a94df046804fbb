//! Evaluation engine for a touch-driven negative-space puzzle.
//!
//! The player paints a canvas with touches while avoiding a hidden solution
//! zone. This crate accumulates those touches into a [`Heatmap`], tests them
//! against a [`SolutionZone`], and turns a full session into a verdict:
//! continue, zone violated, or solved with a score.
//!
//! Everything here is pure and synchronous: operations are total functions
//! from immutable inputs to new immutable values, so the engine is safe to
//! drive from any host concurrency model as long as updates to one session
//! are applied in arrival order.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A `TouchPoint`, `SolutionZone`, or `Heatmap` was built from out-of-domain
/// values.
///
/// Construction is the only place domain invariants can be violated; once a
/// value exists it stays valid. Deserialization routes through the same
/// checks.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConstructionError {
    #[display("{axis} coordinate must be within [0, 1], got {value}")]
    CoordinateOutOfRange { axis: &'static str, value: f32 },
    #[display("pressure must be within [0, 1], got {value}")]
    PressureOutOfRange { value: f32 },
    #[display("canvas size must be positive and finite, got {width}x{height}")]
    CanvasSizeInvalid { width: f32, height: f32 },
    #[display("zone center must be within [0, 1], got ({center_x}, {center_y})")]
    ZoneCenterOutOfRange { center_x: f32, center_y: f32 },
    #[display("zone extents must be within (0, 1], got {width}x{height}")]
    ZoneExtentOutOfRange { width: f32, height: f32 },
    #[display("grid dimensions must be positive, got {width}x{height}")]
    GridDimensionsZero { width: usize, height: usize },
    #[display("cell count {actual} does not match grid dimensions {width}x{height}")]
    CellCountMismatch {
        width: usize,
        height: usize,
        actual: usize,
    },
    #[display("cell {index} intensity must be within [0, {max_intensity}], got {value}")]
    CellIntensityOutOfRange {
        index: usize,
        value: f32,
        max_intensity: f32,
    },
}
