use instant::Instant;
use std::time::Duration;

const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Frame timing for hosts that do not receive a frame timestamp, plus a
/// periodic frames-per-second report at `debug` level.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    report_start: Instant,
    report_frames: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            report_start: now,
            report_frames: 0,
        }
    }

    /// Milliseconds since the clock was created.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Count a rendered frame; returns the measured rate when a report
    /// interval has elapsed.
    pub fn frame(&mut self) -> Option<f32> {
        self.report_frames += 1;
        let window = self.report_start.elapsed();
        if window < FPS_REPORT_INTERVAL {
            return None;
        }
        let fps = self.report_frames as f32 / window.as_secs_f32();
        log::debug!("[frame] {:.1} fps", fps);
        self.report_start = Instant::now();
        self.report_frames = 0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic() {
        let clock = FrameClock::new();
        let a = clock.elapsed_ms();
        let b = clock.elapsed_ms();
        assert!(a >= 0.0 && b >= a);
    }

    #[test]
    fn no_report_before_interval() {
        let mut clock = FrameClock::new();
        assert!(clock.frame().is_none());
        assert!(clock.frame().is_none());
    }
}
