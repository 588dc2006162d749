// Tuning constants for the wave field. Values are tuned by eye; keep them
// stable so the motion matches across hosts.

// Grid overscan (px) so drifting points never expose the container edge
pub const OVERSCAN_X: f32 = 200.0;
pub const OVERSCAN_Y: f32 = 30.0;

// Smallest accepted xGap / yGap (px)
pub const MIN_GAP: f32 = 1.0;

// Ambient noise sampling
pub const NOISE_SCALE_X: f64 = 0.002; // spatial/time frequency along x
pub const NOISE_SCALE_Y: f64 = 0.0015; // spatial/time frequency along y
pub const NOISE_ANGLE_SCALE: f64 = 12.0; // noise value -> displacement angle (radians)

// Cursor interaction
pub const CURSOR_MIN_RADIUS: f32 = 175.0; // influence radius floor (px)
pub const CURSOR_FALLOFF_FREQ: f32 = 0.001; // cos(distance * freq) falloff
pub const CURSOR_COUPLING: f32 = 0.00065; // pointer speed -> point velocity

// Spring integration: offset += velocity * step
pub const SPRING_INTEGRATION_STEP: f32 = 2.0;

// Pointer smoothing (per frame, not per second)
pub const POINTER_SMOOTHING: f32 = 0.1;
pub const POINTER_SPEED_SMOOTHING: f32 = 0.1;
pub const POINTER_SPEED_MAX: f32 = 100.0; // px per frame

// Drawn coordinates are rounded to 1 / DRAW_PRECISION px
pub const DRAW_PRECISION: f32 = 10.0;
