//! Per-instance animation state.
//!
//! One [`AnimationState`] belongs to one mounted wave field. Input handlers
//! only feed it positions and bounds; the frame loop is the single consumer
//! that advances the pointer, runs the physics and draws. Hosts wrap it in
//! whatever shared cell their event model needs.

use crate::config::WavesConfig;
use crate::grid::Grid;
use crate::physics;
use crate::pointer::{Bounds, PointerState};
use crate::render::{self, LineSurface};
use crate::wave_noise::WaveNoise;

#[derive(Debug)]
pub struct AnimationState {
    config: WavesConfig,
    noise: WaveNoise,
    bounds: Bounds,
    grid: Grid,
    pointer: PointerState,
}

impl AnimationState {
    /// `config` is expected to be validated already.
    pub fn new(config: WavesConfig, noise: WaveNoise) -> Self {
        Self {
            config,
            noise,
            bounds: Bounds::default(),
            grid: Grid::default(),
            pointer: PointerState::default(),
        }
    }

    pub fn with_seed(config: WavesConfig, seed: u32) -> Self {
        Self::new(config, WaveNoise::new(seed))
    }

    /// Cache new container bounds and rebuild the grid. Accumulated cursor
    /// offsets are discarded with the old grid.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.grid = Grid::build(
            bounds.width,
            bounds.height,
            self.config.x_gap,
            self.config.y_gap,
        );
        log::debug!(
            "[grid] rebuilt for {}x{}: {} lines x {} points",
            bounds.width,
            bounds.height,
            self.grid.line_count(),
            self.grid.points_per_line()
        );
    }

    /// Feed a pointer or touch position in page coordinates.
    pub fn pointer_moved(&mut self, page_x: f32, page_y: f32, scroll_y: f32) {
        let local = self.bounds.to_local(page_x, page_y, scroll_y);
        self.pointer.observe(local);
    }

    /// Advance one frame at `time_ms` and draw it.
    pub fn frame(&mut self, time_ms: f64, surface: &mut impl LineSurface) {
        self.pointer.tick();
        physics::step(
            &mut self.grid,
            &self.pointer,
            &self.noise,
            &self.config,
            time_ms,
        );
        render::draw(&self.grid, &self.bounds, &self.config.line_color, surface);
    }

    #[inline]
    pub fn config(&self) -> &WavesConfig {
        &self.config
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    #[test]
    fn frame_before_resize_draws_nothing() {
        let mut state = AnimationState::with_seed(WavesConfig::default(), 1);
        let mut surface = RecordingSurface::new();
        state.frame(0.0, &mut surface);
        assert_eq!(surface.clears, 1);
        assert!(surface.lines.is_empty());
    }

    #[test]
    fn pointer_goes_through_bounds() {
        let mut state = AnimationState::with_seed(WavesConfig::default(), 1);
        state.resize(Bounds::new(50.0, 20.0, 400.0, 300.0));
        state.pointer_moved(150.0, 120.0, 10.0);
        assert_eq!(state.pointer().raw, glam::Vec2::new(100.0, 110.0));
        assert!(state.pointer().is_initialized());
    }

    #[test]
    fn resize_caches_bounds() {
        let mut state = AnimationState::with_seed(WavesConfig::default(), 1);
        let bounds = Bounds::new(10.0, 500.0, 400.0, 300.0);
        state.resize(bounds);
        assert_eq!(*state.bounds(), bounds);
        assert_eq!(state.grid().line_count(), 61);
    }
}
