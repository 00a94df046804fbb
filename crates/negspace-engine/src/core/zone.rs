use serde::{Deserialize, Serialize};

use crate::{ConstructionError, TouchPoint};

/// Shape of a [`SolutionZone`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::IsVariant,
)]
pub enum ZoneShape {
    #[default]
    Rectangle,
    Ellipse,
}

/// The hidden region the player must leave untouched.
///
/// Defined by a normalized center and extents plus a [`ZoneShape`]. Extents may
/// overhang the canvas; the effective bounds are clamped into `[0, 1]` so
/// containment tests never reach outside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSolutionZone", into = "RawSolutionZone")]
pub struct SolutionZone {
    center_x: f32,
    center_y: f32,
    width: f32,
    height: f32,
    shape: ZoneShape,
}

/// Unvalidated mirror of [`SolutionZone`] used as the serde wire form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawSolutionZone {
    center_x: f32,
    center_y: f32,
    width: f32,
    height: f32,
    #[serde(default)]
    shape: ZoneShape,
}

impl TryFrom<RawSolutionZone> for SolutionZone {
    type Error = ConstructionError;

    fn try_from(raw: RawSolutionZone) -> Result<Self, Self::Error> {
        Self::new(raw.center_x, raw.center_y, raw.width, raw.height, raw.shape)
    }
}

impl From<SolutionZone> for RawSolutionZone {
    fn from(zone: SolutionZone) -> Self {
        Self {
            center_x: zone.center_x,
            center_y: zone.center_y,
            width: zone.width,
            height: zone.height,
            shape: zone.shape,
        }
    }
}

impl SolutionZone {
    /// Creates a zone, rejecting centers outside `[0, 1]` and extents outside
    /// `(0, 1]`.
    pub fn new(
        center_x: f32,
        center_y: f32,
        width: f32,
        height: f32,
        shape: ZoneShape,
    ) -> Result<Self, ConstructionError> {
        if !(0.0..=1.0).contains(&center_x) || !(0.0..=1.0).contains(&center_y) {
            return Err(ConstructionError::ZoneCenterOutOfRange { center_x, center_y });
        }
        if !(width > 0.0 && width <= 1.0) || !(height > 0.0 && height <= 1.0) {
            return Err(ConstructionError::ZoneExtentOutOfRange { width, height });
        }
        Ok(Self {
            center_x,
            center_y,
            width,
            height,
            shape,
        })
    }

    pub fn rectangle(
        center_x: f32,
        center_y: f32,
        width: f32,
        height: f32,
    ) -> Result<Self, ConstructionError> {
        Self::new(center_x, center_y, width, height, ZoneShape::Rectangle)
    }

    pub fn ellipse(
        center_x: f32,
        center_y: f32,
        width: f32,
        height: f32,
    ) -> Result<Self, ConstructionError> {
        Self::new(center_x, center_y, width, height, ZoneShape::Ellipse)
    }

    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.center_y
    }

    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[must_use]
    pub fn shape(&self) -> ZoneShape {
        self.shape
    }

    /// Left edge of the bounding box, clamped to the canvas.
    #[must_use]
    pub fn left(&self) -> f32 {
        (self.center_x - self.width / 2.0).max(0.0)
    }

    /// Right edge of the bounding box, clamped to the canvas.
    #[must_use]
    pub fn right(&self) -> f32 {
        (self.center_x + self.width / 2.0).min(1.0)
    }

    /// Top edge of the bounding box, clamped to the canvas.
    #[must_use]
    pub fn top(&self) -> f32 {
        (self.center_y - self.height / 2.0).max(0.0)
    }

    /// Bottom edge of the bounding box, clamped to the canvas.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        (self.center_y + self.height / 2.0).min(1.0)
    }

    /// Tests whether a normalized point lies inside the zone.
    ///
    /// Both shapes are closed regions, so the boundary counts as inside. The
    /// rectangle test uses the clamped bounds; the ellipse test uses the
    /// normalized distance to the center.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        match self.shape {
            ZoneShape::Rectangle => {
                (self.left()..=self.right()).contains(&x)
                    && (self.top()..=self.bottom()).contains(&y)
            }
            ZoneShape::Ellipse => {
                let dx = (x - self.center_x) / (self.width / 2.0);
                let dy = (y - self.center_y) / (self.height / 2.0);
                dx * dx + dy * dy <= 1.0
            }
        }
    }

    #[must_use]
    pub fn contains_touch(&self, point: TouchPoint) -> bool {
        self.contains_point(point.x(), point.y())
    }

    /// Enumerates the grid cells whose center lies inside the zone.
    ///
    /// Only the cell-index range implied by the zone's bounding box is
    /// scanned. Cells are produced in row-major order.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn covered_cells(&self, grid_width: usize, grid_height: usize) -> Vec<(usize, usize)> {
        if grid_width == 0 || grid_height == 0 {
            return vec![];
        }
        let start_x = (self.left() * grid_width as f32) as usize;
        let end_x = ((self.right() * grid_width as f32) as usize).min(grid_width - 1);
        let start_y = (self.top() * grid_height as f32) as usize;
        let end_y = ((self.bottom() * grid_height as f32) as usize).min(grid_height - 1);

        let mut cells = vec![];
        for y in start_y..=end_y {
            for x in start_x..=end_x {
                let normalized_x = (x as f32 + 0.5) / grid_width as f32;
                let normalized_y = (y as f32 + 0.5) / grid_height as f32;
                if self.contains_point(normalized_x, normalized_y) {
                    cells.push((x, y));
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_contains_point() {
        let zone = SolutionZone::rectangle(0.5, 0.5, 0.2, 0.2).unwrap();
        assert!(zone.contains_point(0.5, 0.5));
        assert!(!zone.contains_point(0.1, 0.1));
        // Boundary counts as inside.
        assert!(zone.contains_point(0.4, 0.5));
        assert!(zone.contains_point(0.6, 0.5));
    }

    #[test]
    fn test_ellipse_contains_point() {
        let zone = SolutionZone::ellipse(0.5, 0.5, 0.4, 0.4).unwrap();
        assert!(zone.contains_point(0.5, 0.5));
        // Bounding-box corners lie outside the inscribed ellipse.
        assert!(!zone.contains_point(0.3, 0.3));
        assert!(!zone.contains_point(0.7, 0.7));
        // Axis extremes are on the boundary.
        assert!(zone.contains_point(0.3, 0.5));
        assert!(zone.contains_point(0.5, 0.7));
    }

    #[test]
    fn test_contains_touch() {
        let zone = SolutionZone::rectangle(0.5, 0.5, 0.2, 0.2).unwrap();
        let inside = TouchPoint::new(0.5, 0.5, 0, 1.0).unwrap();
        let outside = TouchPoint::new(0.9, 0.9, 0, 1.0).unwrap();
        assert!(zone.contains_touch(inside));
        assert!(!zone.contains_touch(outside));
    }

    #[test]
    fn test_bounds_clamped_to_canvas() {
        let zone = SolutionZone::rectangle(0.05, 0.95, 0.2, 0.2).unwrap();
        assert_eq!(zone.left(), 0.0);
        assert!((zone.right() - 0.15).abs() < 1e-6);
        assert!((zone.top() - 0.85).abs() < 1e-6);
        assert_eq!(zone.bottom(), 1.0);
    }

    #[test]
    fn test_center_out_of_range_rejected() {
        assert!(matches!(
            SolutionZone::rectangle(1.5, 0.5, 0.2, 0.2),
            Err(ConstructionError::ZoneCenterOutOfRange { .. })
        ));
        assert!(matches!(
            SolutionZone::rectangle(0.5, -0.1, 0.2, 0.2),
            Err(ConstructionError::ZoneCenterOutOfRange { .. })
        ));
    }

    #[test]
    fn test_extent_out_of_range_rejected() {
        assert!(matches!(
            SolutionZone::rectangle(0.5, 0.5, 0.0, 0.2),
            Err(ConstructionError::ZoneExtentOutOfRange { .. })
        ));
        assert!(matches!(
            SolutionZone::rectangle(0.5, 0.5, 0.2, 1.5),
            Err(ConstructionError::ZoneExtentOutOfRange { .. })
        ));
        assert!(SolutionZone::rectangle(0.5, 0.5, 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(SolutionZone::rectangle(f32::NAN, 0.5, 0.2, 0.2).is_err());
        assert!(SolutionZone::rectangle(0.5, 0.5, f32::NAN, 0.2).is_err());
    }

    #[test]
    fn test_covered_cells_rectangle() {
        let zone = SolutionZone::rectangle(0.5, 0.5, 0.2, 0.2).unwrap();
        let cells = zone.covered_cells(10, 10);
        // Bounds [0.4, 0.6] cover cell centers at 0.45 and 0.55 on each axis.
        assert_eq!(cells, vec![(4, 4), (5, 4), (4, 5), (5, 5)]);
    }

    #[test]
    fn test_covered_cells_ellipse_excludes_corners() {
        let rect = SolutionZone::rectangle(0.5, 0.5, 0.4, 0.4).unwrap();
        let ellipse = SolutionZone::ellipse(0.5, 0.5, 0.4, 0.4).unwrap();
        let rect_cells = rect.covered_cells(20, 20);
        let ellipse_cells = ellipse.covered_cells(20, 20);
        assert!(ellipse_cells.len() < rect_cells.len());
        assert!(!ellipse_cells.contains(&(6, 6)));
        assert!(ellipse_cells.contains(&(10, 10)));
    }

    #[test]
    fn test_covered_cells_degenerate_grid() {
        let zone = SolutionZone::rectangle(0.5, 0.5, 0.2, 0.2).unwrap();
        assert!(zone.covered_cells(0, 10).is_empty());
        assert!(zone.covered_cells(10, 0).is_empty());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let zone = SolutionZone::ellipse(0.25, 0.75, 0.3, 0.4).unwrap();
        let serialized = serde_json::to_string(&zone).unwrap();
        let deserialized: SolutionZone = serde_json::from_str(&serialized).unwrap();
        assert_eq!(zone, deserialized);
    }

    #[test]
    fn test_deserialization_rejects_out_of_range() {
        let json = r#"{"center_x":0.5,"center_y":0.5,"width":2.0,"height":0.2,"shape":"Rectangle"}"#;
        let result: Result<SolutionZone, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_shape_defaults_to_rectangle() {
        let json = r#"{"center_x":0.5,"center_y":0.5,"width":0.2,"height":0.2}"#;
        let zone: SolutionZone = serde_json::from_str(json).unwrap();
        assert!(zone.shape().is_rectangle());
    }
}
