use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots and pacing deadlines.
///
/// Delta time is clamped to avoid pathological values when the application
/// stalls, is minimized, or sits in a modal file dialog.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
    interval: Duration,
}

impl FrameClock {
    /// Default pacing rate in frames per second.
    pub const DEFAULT_FPS: u32 = 60;

    pub fn new() -> Self {
        Self::with_rate(Self::DEFAULT_FPS)
    }

    /// Clock paced at `fps` frames per second. Zero is treated as one.
    pub fn with_rate(fps: u32) -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
            interval: Duration::from_secs(1) / fps.max(1),
        }
    }

    /// Target interval between frames.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant at which the next frame is due.
    #[inline]
    pub fn next_deadline(&self) -> Instant {
        self.last + self.interval
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_from_rate() {
        assert_eq!(FrameClock::with_rate(50).interval(), Duration::from_millis(20));
        assert_eq!(FrameClock::with_rate(0).interval(), Duration::from_secs(1));
    }

    #[test]
    fn tick_clamps_and_counts() {
        let mut clock = FrameClock::with_rate(60);
        let start = clock.last;

        let first = clock.tick_at(start);
        assert_eq!(first.frame_index, 0);
        assert!((first.dt - 0.0001).abs() < 1e-6);

        let second = clock.tick_at(start + Duration::from_secs(5));
        assert_eq!(second.frame_index, 1);
        assert!((second.dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn deadline_follows_last_tick() {
        let mut clock = FrameClock::with_rate(10);
        let start = clock.last;
        clock.tick_at(start);
        assert_eq!(clock.next_deadline(), start + Duration::from_millis(100));
    }
}
