//! Lattice of points the wave lines are drawn through.
//!
//! A grid is a set of vertical lines spaced `x_gap` apart, each holding points
//! spaced `y_gap` apart. It overscans the container so that drifting points
//! never uncover an edge, and it is rebuilt from scratch whenever the
//! container changes size.

use crate::constants::{OVERSCAN_X, OVERSCAN_Y};
use glam::Vec2;

/// Damped-spring state of a point's cursor-driven displacement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorSpring {
    pub offset: Vec2,
    pub velocity: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Rest position, fixed when the grid is built.
    pub base: Vec2,
    /// Ambient noise displacement, recomputed every frame.
    pub wave: Vec2,
    pub cursor: CursorSpring,
}

impl Point {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            base: Vec2::new(x, y),
            wave: Vec2::ZERO,
            cursor: CursorSpring::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Grid {
    lines: Vec<Vec<Point>>,
}

impl Grid {
    /// Build a grid covering a `width` x `height` container.
    ///
    /// Produces `ceil((width + 200) / x_gap) + 1` lines of
    /// `ceil((height + 30) / y_gap) + 1` points, centred on the container.
    /// Gaps must be at least `MIN_GAP` (see `WavesConfig::validated`). A zero-sized
    /// container still yields a (small) grid.
    pub fn build(width: f32, height: f32, x_gap: f32, y_gap: f32) -> Self {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let total_lines = ((width + OVERSCAN_X) / x_gap).ceil() as usize;
        let total_points = ((height + OVERSCAN_Y) / y_gap).ceil() as usize;
        let x_start = (width - x_gap * total_lines as f32) / 2.0;
        let y_start = (height - y_gap * total_points as f32) / 2.0;

        let lines = (0..=total_lines)
            .map(|i| {
                let x = x_start + x_gap * i as f32;
                (0..=total_points)
                    .map(|j| Point::at(x, y_start + y_gap * j as f32))
                    .collect()
            })
            .collect();
        Self { lines }
    }

    #[inline]
    pub fn lines(&self) -> &[Vec<Point>] {
        &self.lines
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Every line has the same length; 0 for an empty grid.
    #[inline]
    pub fn points_per_line(&self) -> usize {
        self.lines.first().map_or(0, Vec::len)
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.lines.iter().flatten()
    }

    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut Point> {
        self.lines.iter_mut().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_for_reference_container() {
        let g = Grid::build(800.0, 600.0, 10.0, 32.0);
        assert_eq!(g.line_count(), 101);
        assert_eq!(g.points_per_line(), 21);
        assert_eq!(g.point_count(), 101 * 21);
    }

    #[test]
    fn counts_follow_ceil_formula() {
        for &(w, h, xg, yg) in &[
            (1024.0_f32, 768.0_f32, 10.0_f32, 32.0_f32),
            (333.0, 17.0, 7.5, 3.0),
            (1.0, 1.0, 1000.0, 1000.0),
            (1920.0, 1080.0, 13.0, 29.0),
        ] {
            let g = Grid::build(w, h, xg, yg);
            assert_eq!(g.line_count(), ((w + 200.0) / xg).ceil() as usize + 1);
            assert_eq!(g.points_per_line(), ((h + 30.0) / yg).ceil() as usize + 1);
            assert!(g.lines().iter().all(|l| l.len() == g.points_per_line()));
        }
    }

    #[test]
    fn grid_is_centred_on_container() {
        let (w, h) = (800.0, 600.0);
        let g = Grid::build(w, h, 10.0, 32.0);
        let first = g.lines()[0][0].base;
        let last_line = &g.lines()[g.line_count() - 1];
        let last = last_line[last_line.len() - 1].base;
        // Lines 0..=n span n gaps; the midpoint of 0..n gaps sits at the centre.
        let mid_x = first.x + 10.0 * (g.line_count() - 1) as f32 / 2.0;
        let mid_y = first.y + 32.0 * (g.points_per_line() - 1) as f32 / 2.0;
        assert!((mid_x - w / 2.0).abs() < 1e-3);
        assert!((mid_y - h / 2.0).abs() < 1e-3);
        assert!(first.x < 0.0 && last.x > w);
        assert!(first.y < 0.0 && last.y > h);
    }

    #[test]
    fn zero_sized_container_builds_degenerate_grid() {
        let g = Grid::build(0.0, 0.0, 10.0, 32.0);
        assert_eq!(g.line_count(), 21);
        assert_eq!(g.points_per_line(), 2);
    }

    #[test]
    fn new_points_start_at_rest() {
        let g = Grid::build(100.0, 100.0, 10.0, 10.0);
        assert!(g
            .points()
            .all(|p| p.wave == Vec2::ZERO && p.cursor == CursorSpring::default()));
    }
}
