//! Stroking the grid onto a 2D line surface.

use crate::constants::DRAW_PRECISION;
use crate::grid::{Grid, Point};
use crate::pointer::Bounds;
use glam::Vec2;

/// Minimal 2D path API the renderer draws through. The web host implements
/// it on top of `CanvasRenderingContext2d`; [`RecordingSurface`] keeps the
/// paths in memory.
pub trait LineSurface {
    /// Clear the whole `width` x `height` surface.
    fn clear(&mut self, width: f32, height: f32);
    /// Start a new path stroked with `color`.
    fn begin_line(&mut self, color: &str);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    /// Stroke the current path.
    fn stroke(&mut self);
}

/// Where a point is drawn this frame, rounded to a tenth of a pixel.
#[inline]
pub fn drawn_position(point: &Point, with_cursor: bool) -> Vec2 {
    let mut p = point.base + point.wave;
    if with_cursor {
        p += point.cursor.offset;
    }
    (p * DRAW_PRECISION).round() / DRAW_PRECISION
}

/// Clear the surface and stroke one path per grid line.
///
/// The path starts at the first point without its cursor offset, and the
/// last point is drawn without it as well, so line ends taper back to the
/// wave instead of snapping with the cursor.
pub fn draw(grid: &Grid, bounds: &Bounds, line_color: &str, surface: &mut impl LineSurface) {
    surface.clear(bounds.width, bounds.height);
    for line in grid.lines() {
        let Some(first) = line.first() else {
            continue;
        };
        let last = line.len() - 1;
        surface.begin_line(line_color);
        surface.move_to(drawn_position(first, false));
        for (idx, point) in line.iter().enumerate() {
            surface.line_to(drawn_position(point, idx != last));
        }
        surface.stroke();
    }
}

/// A stroked path captured by [`RecordingSurface`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedLine {
    pub color: String,
    pub points: Vec<Vec2>,
    pub stroked: bool,
}

/// In-memory [`LineSurface`]. Each `clear` drops the previous frame.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub size: Vec2,
    pub clears: usize,
    pub lines: Vec<RecordedLine>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of recorded vertices across all lines.
    pub fn vertex_count(&self) -> usize {
        self.lines.iter().map(|l| l.points.len()).sum()
    }
}

impl LineSurface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.clears += 1;
        self.lines.clear();
    }

    fn begin_line(&mut self, color: &str) {
        self.lines.push(RecordedLine {
            color: color.to_string(),
            ..RecordedLine::default()
        });
    }

    fn move_to(&mut self, p: Vec2) {
        if let Some(line) = self.lines.last_mut() {
            line.points.push(p);
        }
    }

    fn line_to(&mut self, p: Vec2) {
        if let Some(line) = self.lines.last_mut() {
            line.points.push(p);
        }
    }

    fn stroke(&mut self) {
        if let Some(line) = self.lines.last_mut() {
            line.stroked = true;
        }
    }
}
