use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds, clamped to
    /// `[0.1 ms, 250 ms]`.
    ///
    /// Anything integrated over `dt` (mesh spin, parallax easing) loses the
    /// excess on a stall longer than 250 ms and resumes from where it was.
    /// Only `elapsed` follows the wall clock exactly.
    pub dt: f32,

    /// Time elapsed since the clock was created or reset, in seconds.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// produce a giant step. `elapsed` is not clamped; it always tracks the wall
/// clock since `start`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline. `elapsed` keeps counting from `start`.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to an explicit instant.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
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
    fn delta_is_clamped_after_a_stall() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        let ft = clock.tick_at(base + Duration::from_secs(3));
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert!(ft.elapsed >= 3.0);
    }

    #[test]
    fn stalled_frames_integrate_less_than_wall_time() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        let integrated: f32 = (1..=4)
            .map(|i| clock.tick_at(base + Duration::from_secs(i)).dt)
            .sum();
        assert!((integrated - 1.0).abs() < 1e-5);
    }

    #[test]
    fn frame_index_counts_up() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        assert_eq!(clock.tick_at(base + Duration::from_millis(16)).frame_index, 0);
        assert_eq!(clock.tick_at(base + Duration::from_millis(32)).frame_index, 1);
    }

    #[test]
    fn zero_delta_gets_minimum() {
        let mut clock = FrameClock::new();
        let now = Instant::now();
        clock.tick_at(now);
        let ft = clock.tick_at(now);
        assert!((ft.dt - 0.0001).abs() < 1e-6);
    }
}
