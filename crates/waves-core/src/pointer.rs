use crate::constants::{POINTER_SMOOTHING, POINTER_SPEED_MAX, POINTER_SPEED_SMOOTHING};
use glam::Vec2;

/// Cached placement of the host container, in page pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounds of a surface that starts at the origin (native windows).
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Convert event coordinates into container space, accounting for the
    /// vertical page scroll.
    #[inline]
    pub fn to_local(&self, page_x: f32, page_y: f32, scroll_y: f32) -> Vec2 {
        Vec2::new(page_x - self.left, page_y - self.top + scroll_y)
    }
}

/// Smoothed, velocity-aware pointer state.
///
/// Input events only call [`PointerState::observe`]; the frame loop calls
/// [`PointerState::tick`] once per frame so that motion keeps easing out
/// even when no new events arrive.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    /// Latest raw position from input.
    pub raw: Vec2,
    pub smooth: Vec2,
    /// Raw position seen on the previous tick.
    pub last: Vec2,
    /// Raw distance travelled since the previous tick (px per frame).
    pub speed: f32,
    pub smooth_speed: f32,
    /// Direction of travel, radians.
    pub angle: f32,
    initialized: bool,
}

impl PointerState {
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Record a new raw position. The first observation snaps the smoothed
    /// and last positions so the tracker does not see a jump from the origin.
    pub fn observe(&mut self, pos: Vec2) {
        self.raw = pos;
        if !self.initialized {
            self.smooth = pos;
            self.last = pos;
            self.initialized = true;
        }
    }

    /// Advance smoothing by one frame.
    pub fn tick(&mut self) {
        self.smooth += (self.raw - self.smooth) * POINTER_SMOOTHING;

        let delta = self.raw - self.last;
        self.speed = delta.length();
        self.smooth_speed += (self.speed - self.smooth_speed) * POINTER_SPEED_SMOOTHING;
        self.smooth_speed = self.smooth_speed.min(POINTER_SPEED_MAX);
        self.last = self.raw;
        self.angle = delta.y.atan2(delta.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_local_subtracts_offset_and_adds_scroll() {
        let b = Bounds::new(40.0, 100.0, 800.0, 600.0);
        assert_eq!(b.to_local(140.0, 150.0, 0.0), Vec2::new(100.0, 50.0));
        assert_eq!(b.to_local(140.0, 150.0, 25.0), Vec2::new(100.0, 75.0));
    }

    #[test]
    fn first_observation_snaps_without_velocity() {
        let mut p = PointerState::default();
        assert!(!p.is_initialized());
        p.observe(Vec2::new(500.0, 500.0));
        assert!(p.is_initialized());
        p.tick();
        assert_eq!(p.smooth, Vec2::new(500.0, 500.0));
        assert_eq!(p.speed, 0.0);
        assert_eq!(p.smooth_speed, 0.0);
    }

    #[test]
    fn later_jump_moves_ten_percent_per_frame() {
        let mut p = PointerState::default();
        p.observe(Vec2::ZERO);
        p.tick();
        p.observe(Vec2::new(500.0, 500.0));
        p.tick();
        assert!((p.smooth - Vec2::new(50.0, 50.0)).length() < 1e-4);
        let jump = (500.0f32 * 500.0 * 2.0).sqrt();
        assert!((p.speed - jump).abs() < 1e-3);
        assert!((p.smooth_speed - jump * 0.1).abs() < 1e-3);
        assert!((p.angle - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn initialized_flag_is_one_way() {
        let mut p = PointerState::default();
        p.observe(Vec2::new(1.0, 2.0));
        p.observe(Vec2::new(300.0, 2.0));
        assert!(p.is_initialized());
        // Second observation must not snap.
        assert_eq!(p.smooth, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn smoothed_speed_is_capped() {
        let mut p = PointerState::default();
        p.observe(Vec2::ZERO);
        for i in 1..200 {
            let x = if i % 2 == 0 { 0.0 } else { 5000.0 };
            p.observe(Vec2::new(x, 0.0));
            p.tick();
            assert!(p.smooth_speed <= POINTER_SPEED_MAX);
        }
        assert_eq!(p.smooth_speed, POINTER_SPEED_MAX);
    }

    #[test]
    fn motion_eases_out_without_events() {
        let mut p = PointerState::default();
        p.observe(Vec2::ZERO);
        p.tick();
        p.observe(Vec2::new(100.0, 0.0));
        let mut prev = 0.0;
        for _ in 0..30 {
            p.tick();
            assert!(p.smooth.x > prev && p.smooth.x <= 100.0);
            prev = p.smooth.x;
        }
        assert_eq!(p.speed, 0.0);
    }
}
