//! Per-frame displacement of every grid point.
//!
//! Two independent terms act on each point: an ambient wave offset sampled
//! from noise, and a cursor offset integrated as a damped spring that the
//! moving pointer kicks. The wave term is overwritten every frame; the cursor
//! term carries state between frames.

use crate::config::WavesConfig;
use crate::constants::*;
use crate::grid::{CursorSpring, Grid, Point};
use crate::pointer::PointerState;
use crate::wave_noise::WaveNoise;
use glam::Vec2;

/// Advance every point in `grid` to `time_ms`.
pub fn step(
    grid: &mut Grid,
    pointer: &PointerState,
    noise: &WaveNoise,
    config: &WavesConfig,
    time_ms: f64,
) {
    for point in grid.points_mut() {
        step_point(point, pointer, noise, config, time_ms);
    }
}

#[inline]
pub fn step_point(
    point: &mut Point,
    pointer: &PointerState,
    noise: &WaveNoise,
    config: &WavesConfig,
    time_ms: f64,
) {
    point.wave = wave_offset(point.base, noise, config, time_ms);
    kick_cursor(&mut point.cursor, point.base, pointer);
    settle_cursor(&mut point.cursor, config);
}

/// Ambient displacement at `base` for the given time.
#[inline]
pub fn wave_offset(base: Vec2, noise: &WaveNoise, config: &WavesConfig, time_ms: f64) -> Vec2 {
    let nx = (base.x as f64 + time_ms * config.wave_speed_x as f64) * NOISE_SCALE_X;
    let ny = (base.y as f64 + time_ms * config.wave_speed_y as f64) * NOISE_SCALE_Y;
    let angle = (noise.sample(nx, ny) * NOISE_ANGLE_SCALE) as f32;
    Vec2::new(angle.cos() * config.wave_amp_x, angle.sin() * config.wave_amp_y)
}

/// Add the pointer's push to the spring velocity when `base` is within the
/// influence radius.
#[inline]
fn kick_cursor(spring: &mut CursorSpring, base: Vec2, pointer: &PointerState) {
    let dist = base.distance(pointer.smooth);
    let radius = CURSOR_MIN_RADIUS.max(pointer.smooth_speed);
    if dist < radius {
        let falloff = (dist * CURSOR_FALLOFF_FREQ).cos() * (1.0 - dist / radius);
        let push = falloff * radius * pointer.smooth_speed * CURSOR_COUPLING;
        spring.velocity += Vec2::new(pointer.angle.cos(), pointer.angle.sin()) * push;
    }
}

/// Spring back toward rest, damp, integrate and clamp.
#[inline]
fn settle_cursor(spring: &mut CursorSpring, config: &WavesConfig) {
    spring.velocity += -spring.offset * config.tension;
    spring.velocity *= config.friction;
    spring.offset += spring.velocity * SPRING_INTEGRATION_STEP;
    let max = config.max_cursor_move;
    spring.offset = spring.offset.clamp(Vec2::splat(-max), Vec2::splat(max));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still_pointer_at(pos: Vec2) -> PointerState {
        let mut p = PointerState::default();
        p.observe(pos);
        p.tick();
        p
    }

    #[test]
    fn wave_offset_respects_amplitudes() {
        let noise = WaveNoise::new(3);
        let config = WavesConfig::default();
        for i in 0..100 {
            let base = Vec2::new(i as f32 * 13.0, i as f32 * 7.0);
            let w = wave_offset(base, &noise, &config, i as f64 * 16.7);
            // (x / ax)^2 + (y / ay)^2 == 1 on the ellipse cos/sin traces.
            let e = (w.x / config.wave_amp_x).powi(2) + (w.y / config.wave_amp_y).powi(2);
            assert!((e - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn still_pointer_does_not_push() {
        let noise = WaveNoise::new(3);
        let config = WavesConfig::default();
        let pointer = still_pointer_at(Vec2::new(10.0, 10.0));
        let mut point = Point::at(12.0, 12.0);
        step_point(&mut point, &pointer, &noise, &config, 0.0);
        assert_eq!(point.cursor, CursorSpring::default());
    }

    #[test]
    fn moving_pointer_pushes_nearby_points_along_travel() {
        let noise = WaveNoise::new(3);
        let config = WavesConfig::default();
        let mut pointer = PointerState::default();
        pointer.observe(Vec2::new(100.0, 100.0));
        pointer.tick();
        pointer.observe(Vec2::new(150.0, 100.0));
        pointer.tick();

        let mut near = Point::at(110.0, 100.0);
        let mut far = Point::at(1000.0, 100.0);
        step_point(&mut near, &pointer, &noise, &config, 0.0);
        step_point(&mut far, &pointer, &noise, &config, 0.0);
        assert!(near.cursor.velocity.x > 0.0);
        assert!(near.cursor.offset.x > 0.0);
        assert!(near.cursor.velocity.y.abs() < 1e-6);
        assert_eq!(far.cursor, CursorSpring::default());
    }

    #[test]
    fn spring_matches_hand_integration() {
        let config = WavesConfig::default();
        let mut spring = CursorSpring {
            offset: Vec2::new(10.0, -4.0),
            velocity: Vec2::new(1.0, 0.0),
        };
        settle_cursor(&mut spring, &config);
        let vx = (1.0 - 10.0 * 0.005) * 0.925;
        let vy = (0.0 + 4.0 * 0.005) * 0.925;
        assert!((spring.velocity.x - vx).abs() < 1e-6);
        assert!((spring.velocity.y - vy).abs() < 1e-6);
        assert!((spring.offset.x - (10.0 + vx * 2.0)).abs() < 1e-5);
        assert!((spring.offset.y - (-4.0 + vy * 2.0)).abs() < 1e-5);
    }

    #[test]
    fn offset_is_clamped_per_axis() {
        let config = WavesConfig {
            max_cursor_move: 5.0,
            ..WavesConfig::default()
        };
        let mut spring = CursorSpring {
            offset: Vec2::ZERO,
            velocity: Vec2::new(400.0, -400.0),
        };
        settle_cursor(&mut spring, &config);
        assert_eq!(spring.offset, Vec2::new(5.0, -5.0));
    }
}
