use imageproc::contours::{find_contours, BorderType};
use serde::Serialize;
use crate::models::{InkGrid, Point};

/// How outline points are ordered before corner detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutlineOrder {
    /// Row-major scan over the grid
    #[default]
    Scan,
    /// Walk along the longest outer border of the ink
    Boundary,
}

pub fn extract_outline(grid: &InkGrid, stride: u32, order: OutlineOrder) -> Vec<Point> {
    match order {
        OutlineOrder::Scan => scan_outline(grid, stride),
        OutlineOrder::Boundary => trace_outline(grid, stride),
    }
}

/// Ink cells with at least one blank in-bounds 4-neighbour, in row-major order
pub fn scan_outline(grid: &InkGrid, stride: u32) -> Vec<Point> {
    let (width, height) = (grid.width(), grid.height());
    let mut outline = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if !grid.is_ink(x, y) {
                continue;
            }

            let has_blank_neighbor = (x > 0 && !grid.is_ink(x - 1, y))
                || (x + 1 < width && !grid.is_ink(x + 1, y))
                || (y > 0 && !grid.is_ink(x, y - 1))
                || (y + 1 < height && !grid.is_ink(x, y + 1));

            if has_blank_neighbor {
                outline.push(to_bitmap(x, y, stride));
            }
        }
    }

    outline
}

/// Border-following walk of the largest outer contour
pub fn trace_outline(grid: &InkGrid, stride: u32) -> Vec<Point> {
    if grid.is_empty() {
        return Vec::new();
    }

    find_contours::<u32>(&grid.to_mask())
        .into_iter()
        .filter(|contour| matches!(contour.border_type, BorderType::Outer))
        .max_by_key(|contour| contour.points.len())
        .map(|contour| {
            contour
                .points
                .iter()
                .map(|p| to_bitmap(p.x, p.y, stride))
                .collect()
        })
        .unwrap_or_default()
}

fn to_bitmap(gx: u32, gy: u32, stride: u32) -> Point {
    Point::new((gx * stride) as f64, (gy * stride) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> InkGrid {
        // 3x3 ink block centred in a 5x5 grid
        InkGrid::from_fn(5, 5, |x, y| (1..=3).contains(&x) && (1..=3).contains(&y))
    }

    #[test]
    fn scan_skips_interior_cells() {
        let outline = scan_outline(&block(), 5);
        assert_eq!(outline.len(), 8);
        assert!(!outline.contains(&Point::new(10.0, 10.0)));
        assert_eq!(outline[0], Point::new(5.0, 5.0));
        assert_eq!(outline[7], Point::new(15.0, 15.0));
    }

    #[test]
    fn grid_edges_are_not_blank_neighbours() {
        let full = InkGrid::from_fn(4, 4, |_, _| true);
        assert!(scan_outline(&full, 5).is_empty());
    }

    #[test]
    fn traced_points_are_ink() {
        let grid = block();
        let outline = trace_outline(&grid, 5);
        assert!(!outline.is_empty());
        for p in &outline {
            assert!(grid.is_ink(p.x as u32 / 5, p.y as u32 / 5));
        }
    }

    #[test]
    fn tracing_empty_grid_yields_nothing() {
        let blank = InkGrid::from_fn(6, 4, |_, _| false);
        assert!(trace_outline(&blank, 5).is_empty());
    }
}
