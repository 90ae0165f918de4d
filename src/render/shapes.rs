//! Module drawers: which pixels of a module's box get the fill color

use std::fmt;

/// Fraction of the box covered by a gapped square
const GAPPED_SIZE_RATIO: f32 = 0.8;

/// How a single dark module is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleShape {
    /// Disc inscribed in the box
    Circle,
    /// Full box
    #[default]
    Square,
    /// Square whose outer corners are rounded where no neighbor continues the edge
    Rounded,
    /// Square shrunk to leave a gap between modules
    GappedSquare,
}

impl ModuleShape {
    /// Shape for a display name. Unrecognized names fall back to `Square`.
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "circle" => ModuleShape::Circle,
            "square" => ModuleShape::Square,
            "rounded" => ModuleShape::Rounded,
            "gappedsquare" | "gapped" => ModuleShape::GappedSquare,
            _ => {
                tracing::debug!(name, "unknown module shape, using square");
                ModuleShape::Square
            }
        }
    }

    /// Whether pixel `(px, py)` inside a `box_size` box is filled
    pub fn covers(&self, px: u32, py: u32, box_size: u32, neighbors: Neighbors) -> bool {
        let b = box_size as f32;
        let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
        match self {
            ModuleShape::Square => true,
            ModuleShape::GappedSquare => {
                let delta = (1.0 - GAPPED_SIZE_RATIO) * b / 2.0;
                (delta..=b - delta).contains(&cx) && (delta..=b - delta).contains(&cy)
            }
            ModuleShape::Circle => in_disc(cx, cy, b),
            ModuleShape::Rounded => {
                let left = cx < b / 2.0;
                let top = cy < b / 2.0;
                let rounded = match (left, top) {
                    (true, true) => !neighbors.north && !neighbors.west,
                    (false, true) => !neighbors.north && !neighbors.east,
                    (true, false) => !neighbors.south && !neighbors.west,
                    (false, false) => !neighbors.south && !neighbors.east,
                };
                !rounded || in_disc(cx, cy, b)
            }
        }
    }
}

fn in_disc(cx: f32, cy: f32, b: f32) -> bool {
    let r = b / 2.0;
    let (dx, dy) = (cx - r, cy - r);
    dx * dx + dy * dy <= r * r
}

impl fmt::Display for ModuleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModuleShape::Circle => "Circle",
            ModuleShape::Square => "Square",
            ModuleShape::Rounded => "Rounded",
            ModuleShape::GappedSquare => "Gapped Square",
        };
        f.write_str(name)
    }
}

/// Which orthogonal neighbors of a module are on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    /// Module above
    pub north: bool,
    /// Module below
    pub south: bool,
    /// Module to the right
    pub east: bool,
    /// Module to the left
    pub west: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(shape: ModuleShape, box_size: u32, neighbors: Neighbors) -> usize {
        (0..box_size)
            .flat_map(|y| (0..box_size).map(move |x| (x, y)))
            .filter(|&(x, y)| shape.covers(x, y, box_size, neighbors))
            .count()
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ModuleShape::from_name("Circle"), ModuleShape::Circle);
        assert_eq!(ModuleShape::from_name("Gapped Square"), ModuleShape::GappedSquare);
        assert_eq!(ModuleShape::from_name("rounded"), ModuleShape::Rounded);
    }

    #[test]
    fn test_unknown_name_falls_back_to_square() {
        assert_eq!(ModuleShape::from_name("Hexagon"), ModuleShape::Square);
        assert_eq!(ModuleShape::from_name(""), ModuleShape::Square);
    }

    #[test]
    fn test_square_fills_box() {
        assert_eq!(coverage(ModuleShape::Square, 4, Neighbors::default()), 16);
    }

    #[test]
    fn test_circle_drops_corners() {
        let n = coverage(ModuleShape::Circle, 4, Neighbors::default());
        assert_eq!(n, 12);
        assert!(!ModuleShape::Circle.covers(0, 0, 4, Neighbors::default()));
        assert!(ModuleShape::Circle.covers(1, 1, 4, Neighbors::default()));
    }

    #[test]
    fn test_gapped_square_leaves_margin() {
        let n = coverage(ModuleShape::GappedSquare, 10, Neighbors::default());
        assert_eq!(n, 64);
        assert!(!ModuleShape::GappedSquare.covers(0, 5, 10, Neighbors::default()));
    }

    #[test]
    fn test_rounded_follows_neighbors() {
        let isolated = coverage(ModuleShape::Rounded, 8, Neighbors::default());
        let all = Neighbors {
            north: true,
            south: true,
            east: true,
            west: true,
        };
        assert_eq!(coverage(ModuleShape::Rounded, 8, all), 64);
        assert!(isolated < 64);

        // Joined on the west: only the east corners round off
        let west = Neighbors {
            west: true,
            ..Neighbors::default()
        };
        assert!(ModuleShape::Rounded.covers(0, 0, 8, west));
        assert!(!ModuleShape::Rounded.covers(7, 0, 8, west));
    }
}
