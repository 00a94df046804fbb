use serde::{Deserialize, Serialize};

use crate::{ConstructionError, TouchPoint};

/// Grid-based intensity field accumulating touch coverage.
///
/// Cells are stored row-major and hold intensities in `[0, max_intensity]`.
/// A heatmap is a value: painting produces a new heatmap and never mutates
/// the original, so snapshots of earlier states stay valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHeatmap", into = "RawHeatmap")]
pub struct Heatmap {
    grid_width: usize,
    grid_height: usize,
    cells: Vec<f32>,
    max_intensity: f32,
}

/// Unvalidated mirror of [`Heatmap`] used as the serde wire form.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawHeatmap {
    grid_width: usize,
    grid_height: usize,
    cells: Vec<f32>,
    max_intensity: f32,
}

impl TryFrom<RawHeatmap> for Heatmap {
    type Error = ConstructionError;

    fn try_from(raw: RawHeatmap) -> Result<Self, Self::Error> {
        Self::with_cells(raw.grid_width, raw.grid_height, raw.cells, raw.max_intensity)
    }
}

impl From<Heatmap> for RawHeatmap {
    fn from(heatmap: Heatmap) -> Self {
        Self {
            grid_width: heatmap.grid_width,
            grid_height: heatmap.grid_height,
            cells: heatmap.cells,
            max_intensity: heatmap.max_intensity,
        }
    }
}

impl Default for Heatmap {
    fn default() -> Self {
        Self {
            grid_width: Self::DEFAULT_GRID_SIZE,
            grid_height: Self::DEFAULT_GRID_SIZE,
            cells: vec![0.0; Self::DEFAULT_GRID_SIZE * Self::DEFAULT_GRID_SIZE],
            max_intensity: Self::DEFAULT_MAX_INTENSITY,
        }
    }
}

impl Heatmap {
    /// Side length of the default square grid.
    pub const DEFAULT_GRID_SIZE: usize = 20;
    /// Paint radius in cell units.
    pub const DEFAULT_TOUCH_RADIUS: f32 = 2.0;
    /// Intensity added at the center of a full-pressure touch.
    pub const INTENSITY_INCREMENT: f32 = 0.3;
    /// Ceiling a cell's intensity saturates at.
    pub const DEFAULT_MAX_INTENSITY: f32 = 1.0;
    /// Cells below this intensity count as untouched.
    pub const UNTOUCHED_THRESHOLD: f32 = 0.1;

    /// Creates an all-zero heatmap with the default intensity ceiling.
    pub fn empty(grid_width: usize, grid_height: usize) -> Result<Self, ConstructionError> {
        Self::with_cells(
            grid_width,
            grid_height,
            vec![0.0; grid_width * grid_height],
            Self::DEFAULT_MAX_INTENSITY,
        )
    }

    /// Creates a heatmap from explicit cell values.
    ///
    /// Rejects zero dimensions, a cell count that does not match them, and
    /// any intensity outside `[0, max_intensity]`.
    pub fn with_cells(
        grid_width: usize,
        grid_height: usize,
        cells: Vec<f32>,
        max_intensity: f32,
    ) -> Result<Self, ConstructionError> {
        if grid_width == 0 || grid_height == 0 {
            return Err(ConstructionError::GridDimensionsZero {
                width: grid_width,
                height: grid_height,
            });
        }
        if cells.len() != grid_width * grid_height {
            return Err(ConstructionError::CellCountMismatch {
                width: grid_width,
                height: grid_height,
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, value)| !(0.0..=max_intensity).contains(*value))
        {
            return Err(ConstructionError::CellIntensityOutOfRange {
                index,
                value,
                max_intensity,
            });
        }
        Ok(Self {
            grid_width,
            grid_height,
            cells,
            max_intensity,
        })
    }

    /// Builds a heatmap from ASCII art where `#` is a saturated cell and `.`
    /// is untouched. Intended for tests.
    ///
    /// # Panics
    ///
    /// Panics if the art is empty or its rows have unequal widths.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(!lines.is_empty(), "Art must contain at least one row");

        let mut rows: Vec<Vec<f32>> = vec![];
        for (y, line) in lines.iter().enumerate() {
            let row: Vec<f32> = line
                .chars()
                .filter_map(|ch| match ch {
                    '#' => Some(Self::DEFAULT_MAX_INTENSITY),
                    '.' => Some(0.0),
                    _ => None,
                })
                .collect();
            assert_eq!(
                row.len(),
                lines[0].trim().len(),
                "Each row must have the same width, got {} at row {}",
                row.len(),
                y
            );
            rows.push(row);
        }

        let grid_width = rows[0].len();
        let grid_height = rows.len();
        Self {
            grid_width,
            grid_height,
            cells: rows.concat(),
            max_intensity: Self::DEFAULT_MAX_INTENSITY,
        }
    }

    #[must_use]
    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    #[must_use]
    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    #[must_use]
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    #[must_use]
    pub fn max_intensity(&self) -> f32 {
        self.max_intensity
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.grid_width + x
    }

    /// Intensity at a grid cell, or `0.0` when the cell is out of bounds.
    #[must_use]
    pub fn intensity_at(&self, x: usize, y: usize) -> f32 {
        if x >= self.grid_width || y >= self.grid_height {
            return 0.0;
        }
        self.cells[self.index(x, y)]
    }

    /// Returns a new heatmap with a touch painted at the point.
    ///
    /// The point maps to the nearest cell center; every cell within
    /// Euclidean `radius` (in cell units) gains intensity scaled by a linear
    /// falloff from the center and by the touch pressure, saturating at
    /// `max_intensity`. A non-positive radius paints nothing.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss
    )]
    pub fn paint(&self, point: TouchPoint, radius: f32) -> Self {
        if radius <= 0.0 {
            return self.clone();
        }

        let mut cells = self.cells.clone();
        let center_x =
            ((point.x() * self.grid_width as f32).round() as usize).min(self.grid_width - 1);
        let center_y =
            ((point.y() * self.grid_height as f32).round() as usize).min(self.grid_height - 1);

        let reach = radius.ceil() as isize;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let grid_x = center_x as isize + dx;
                let grid_y = center_y as isize + dy;
                if grid_x < 0
                    || grid_y < 0
                    || grid_x >= self.grid_width as isize
                    || grid_y >= self.grid_height as isize
                {
                    continue;
                }
                let distance = ((dx * dx + dy * dy) as f32).sqrt();
                if distance > radius {
                    continue;
                }
                let falloff = 1.0 - distance / radius;
                let intensity = falloff * point.pressure() * Self::INTENSITY_INCREMENT;
                let index = self.index(grid_x as usize, grid_y as usize);
                cells[index] = (cells[index] + intensity).min(self.max_intensity);
            }
        }

        Self {
            cells,
            ..self.clone()
        }
    }

    /// Fraction of cells with intensity at or above the threshold.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn coverage_ratio(&self, threshold: f32) -> f32 {
        let touched = self
            .cells
            .iter()
            .filter(|&&intensity| intensity >= threshold)
            .count();
        touched as f32 / self.cells.len() as f32
    }

    /// All cells below the threshold, in row-major order.
    #[must_use]
    pub fn untouched_cells(&self, threshold: f32) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &intensity)| intensity < threshold)
            .map(|(index, _)| (index % self.grid_width, index / self.grid_width))
            .collect()
    }

    /// Largest 4-connected component of cells below the threshold.
    ///
    /// Every cell is visited at most once across all components, so the scan
    /// is linear in the grid size. Components are discovered in row-major
    /// order and a later component replaces the current best only when it is
    /// strictly larger, so the result is stable for a given grid.
    #[must_use]
    pub fn largest_untouched_region(&self, threshold: f32) -> Vec<(usize, usize)> {
        let mut visited = vec![false; self.cells.len()];
        let mut largest = vec![];

        for y in 0..self.grid_height {
            for x in 0..self.grid_width {
                let index = self.index(x, y);
                if !visited[index] && self.cells[index] < threshold {
                    let region = self.flood_fill(x, y, threshold, &mut visited);
                    if region.len() > largest.len() {
                        largest = region;
                    }
                }
            }
        }

        largest
    }

    fn flood_fill(
        &self,
        start_x: usize,
        start_y: usize,
        threshold: f32,
        visited: &mut [bool],
    ) -> Vec<(usize, usize)> {
        let mut region = vec![];
        let mut stack = vec![(start_x, start_y)];

        while let Some((x, y)) = stack.pop() {
            if x >= self.grid_width || y >= self.grid_height {
                continue;
            }
            let index = self.index(x, y);
            if visited[index] || self.cells[index] >= threshold {
                continue;
            }

            visited[index] = true;
            region.push((x, y));

            stack.push((x.wrapping_sub(1), y));
            stack.push((x + 1, y));
            stack.push((x, y.wrapping_sub(1)));
            stack.push((x, y + 1));
        }

        region
    }
}
