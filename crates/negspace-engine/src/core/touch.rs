use serde::{Deserialize, Serialize};

use crate::ConstructionError;

/// A single touch on the canvas, in normalized coordinates.
///
/// Coordinates and pressure live in `[0, 1]` so the engine is independent of
/// the host's physical canvas size. A `TouchPoint` is immutable once built;
/// a session's touch log is an append-only sequence of these.
///
/// Serialization round-trips through the same validation as [`Self::new`],
/// so a deserialized point always upholds the range invariants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTouchPoint", into = "RawTouchPoint")]
pub struct TouchPoint {
    x: f32,
    y: f32,
    timestamp_ms: u64,
    pressure: f32,
}

/// Unvalidated mirror of [`TouchPoint`] used as the serde wire form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawTouchPoint {
    x: f32,
    y: f32,
    timestamp_ms: u64,
    pressure: f32,
}

impl TryFrom<RawTouchPoint> for TouchPoint {
    type Error = ConstructionError;

    fn try_from(raw: RawTouchPoint) -> Result<Self, Self::Error> {
        Self::new(raw.x, raw.y, raw.timestamp_ms, raw.pressure)
    }
}

impl From<TouchPoint> for RawTouchPoint {
    fn from(point: TouchPoint) -> Self {
        Self {
            x: point.x,
            y: point.y,
            timestamp_ms: point.timestamp_ms,
            pressure: point.pressure,
        }
    }
}

fn normalized(axis: &'static str, value: f32) -> Result<f32, ConstructionError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConstructionError::CoordinateOutOfRange { axis, value })
    }
}

impl TouchPoint {
    /// Creates a touch point, rejecting coordinates or pressure outside
    /// `[0, 1]`.
    pub fn new(x: f32, y: f32, timestamp_ms: u64, pressure: f32) -> Result<Self, ConstructionError> {
        let x = normalized("x", x)?;
        let y = normalized("y", y)?;
        if !(0.0..=1.0).contains(&pressure) {
            return Err(ConstructionError::PressureOutOfRange { value: pressure });
        }
        Ok(Self {
            x,
            y,
            timestamp_ms,
            pressure,
        })
    }

    /// Normalizes raw device coordinates against the canvas size, clamping
    /// into `[0, 1]`.
    ///
    /// Fails only when the canvas size is degenerate (zero, negative, or
    /// non-finite), which makes the division meaningless.
    pub fn from_canvas_coordinates(
        raw_x: f32,
        raw_y: f32,
        canvas_width: f32,
        canvas_height: f32,
        timestamp_ms: u64,
        pressure: f32,
    ) -> Result<Self, ConstructionError> {
        let valid_extent = |extent: f32| extent.is_finite() && extent > 0.0;
        if !valid_extent(canvas_width) || !valid_extent(canvas_height) {
            return Err(ConstructionError::CanvasSizeInvalid {
                width: canvas_width,
                height: canvas_height,
            });
        }
        Self::new(
            (raw_x / canvas_width).clamp(0.0, 1.0),
            (raw_y / canvas_height).clamp(0.0, 1.0),
            timestamp_ms,
            pressure.clamp(0.0, 1.0),
        )
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }

    #[must_use]
    pub fn pressure(&self) -> f32 {
        self.pressure
    }
}
