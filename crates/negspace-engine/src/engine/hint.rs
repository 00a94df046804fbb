use serde::{Deserialize, Serialize};

use crate::{Heatmap, Level, SolutionZone};

/// Compass bucket the zone's center falls into, for directional hints.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
pub enum Direction {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// A hint handed back to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum Hint {
    /// Author-provided or generated text.
    Text(String),
    /// Rough direction of the zone, once coverage is high enough.
    Directional(Direction),
}

/// Coverage below this always yields the generic exploration hint.
pub const EXPLORATION_COVERAGE: f32 = 0.2;

const THIRD_LOWER: f32 = 0.33;
const THIRD_UPPER: f32 = 0.66;

/// Picks a hint for the player's current progress.
///
/// Static level hints are consumed first, indexed by `hint_level`. Once
/// exhausted, the hint is derived from coverage: too low yields an
/// exploration prompt, below the reveal requirement yields the remaining
/// percentage, and otherwise the zone's rough direction is disclosed. Pure
/// and side-effect free.
#[must_use]
pub fn generate_hint(heatmap: &Heatmap, level: &Level, hint_level: usize) -> Hint {
    if let Some(text) = level.hints().get(hint_level) {
        return Hint::Text(text.clone());
    }

    let coverage = heatmap.coverage_ratio(Heatmap::UNTOUCHED_THRESHOLD);
    if coverage < EXPLORATION_COVERAGE {
        return Hint::Text("Explore more of the canvas".to_owned());
    }
    if coverage < level.min_coverage_required() {
        let remaining = remaining_percentage(level.min_coverage_required(), coverage);
        return Hint::Text(format!("Cover {remaining}% more to reveal the solution"));
    }

    Hint::Directional(zone_direction(level.solution_zone()))
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn remaining_percentage(required: f32, coverage: f32) -> u32 {
    ((required - coverage) * 100.0).round() as u32
}

/// Buckets the zone center by splitting each axis into thirds. A center
/// sitting exactly on a split line belongs to the middle band.
fn zone_direction(zone: &SolutionZone) -> Direction {
    let x = zone.center_x();
    let y = zone.center_y();
    if y < THIRD_LOWER && x < THIRD_LOWER {
        Direction::TopLeft
    } else if y < THIRD_LOWER && x > THIRD_UPPER {
        Direction::TopRight
    } else if y < THIRD_LOWER {
        Direction::Top
    } else if y > THIRD_UPPER && x < THIRD_LOWER {
        Direction::BottomLeft
    } else if y > THIRD_UPPER && x > THIRD_UPPER {
        Direction::BottomRight
    } else if y > THIRD_UPPER {
        Direction::Bottom
    } else if x < THIRD_LOWER {
        Direction::Left
    } else if x > THIRD_UPPER {
        Direction::Right
    } else {
        Direction::Center
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SolutionZone;

    fn level_with_zone(center_x: f32, center_y: f32) -> Level {
        let zone = SolutionZone::rectangle(center_x, center_y, 0.1, 0.1).unwrap();
        Level::new(0, "Test", "Test", zone).with_min_coverage(0.1)
    }

    /// 10x10 grid with the requested number of leading saturated rows.
    fn heatmap_with_rows_painted(rows: usize) -> Heatmap {
        let art: String = (0..10)
            .map(|y| if y < rows { "##########\n" } else { "..........\n" })
            .collect();
        Heatmap::from_ascii(&art)
    }

    #[test]
    fn test_static_hints_served_in_order() {
        let zone = SolutionZone::rectangle(0.5, 0.5, 0.2, 0.2).unwrap();
        let level = Level::new(0, "Test", "Test", zone).with_hints(["First hint", "Second hint"]);
        let heatmap = Heatmap::default();

        assert_eq!(
            generate_hint(&heatmap, &level, 0),
            Hint::Text("First hint".to_owned())
        );
        assert_eq!(
            generate_hint(&heatmap, &level, 1),
            Hint::Text("Second hint".to_owned())
        );
    }

    #[test]
    fn test_dynamic_hint_after_static_exhausted() {
        let zone = SolutionZone::rectangle(0.5, 0.5, 0.2, 0.2).unwrap();
        let level = Level::new(0, "Test", "Test", zone)
            .with_hints(["First hint"])
            .with_min_coverage(0.5);
        let hint = generate_hint(&Heatmap::default(), &level, 1);
        assert!(hint.is_text());
        assert_ne!(hint, Hint::Text("First hint".to_owned()));
    }

    #[test]
    fn test_exploration_hint_when_coverage_low() {
        let level = level_with_zone(0.5, 0.5);
        let hint = generate_hint(&Heatmap::default(), &level, 0);
        assert_eq!(hint, Hint::Text("Explore more of the canvas".to_owned()));
    }

    #[test]
    fn test_coverage_hint_embeds_remaining_percentage() {
        let level = level_with_zone(0.5, 0.5).with_min_coverage(0.5);
        // 3 of 10 rows painted: coverage 0.3, so 20% remains.
        let heatmap = heatmap_with_rows_painted(3);
        assert_eq!(
            generate_hint(&heatmap, &level, 0),
            Hint::Text("Cover 20% more to reveal the solution".to_owned())
        );
    }

    #[test]
    fn test_directional_hint_top_left() {
        let level = level_with_zone(0.1, 0.1);
        let heatmap = heatmap_with_rows_painted(5);
        assert_eq!(
            generate_hint(&heatmap, &level, 0),
            Hint::Directional(Direction::TopLeft)
        );
    }

    #[test]
    fn test_directional_hint_bottom_right() {
        let level = level_with_zone(0.9, 0.9);
        let heatmap = heatmap_with_rows_painted(5);
        assert_eq!(
            generate_hint(&heatmap, &level, 0),
            Hint::Directional(Direction::BottomRight)
        );
    }

    #[test]
    fn test_directional_hint_center() {
        let level = level_with_zone(0.5, 0.5);
        let heatmap = heatmap_with_rows_painted(5);
        assert_eq!(
            generate_hint(&heatmap, &level, 0),
            Hint::Directional(Direction::Center)
        );
    }

    #[test]
    fn test_all_directional_buckets() {
        let heatmap = heatmap_with_rows_painted(5);
        let cases = [
            ((0.1, 0.1), Direction::TopLeft),
            ((0.5, 0.1), Direction::Top),
            ((0.9, 0.1), Direction::TopRight),
            ((0.1, 0.5), Direction::Left),
            ((0.5, 0.5), Direction::Center),
            ((0.9, 0.5), Direction::Right),
            ((0.1, 0.9), Direction::BottomLeft),
            ((0.5, 0.9), Direction::Bottom),
            ((0.9, 0.9), Direction::BottomRight),
        ];
        for ((x, y), expected) in cases {
            let level = level_with_zone(x, y);
            assert_eq!(
                generate_hint(&heatmap, &level, 0),
                Hint::Directional(expected),
                "zone center ({x}, {y})"
            );
        }
    }

    #[test]
    fn test_split_line_belongs_to_middle_band() {
        let level = level_with_zone(0.33, 0.33);
        let heatmap = heatmap_with_rows_painted(5);
        assert_eq!(
            generate_hint(&heatmap, &level, 0),
            Hint::Directional(Direction::Center)
        );
    }
}
