//! Frame timing
//!
//! [`FrameClock`] produces clamped per-frame deltas plus the time since the
//! clock started, which the animated slides use as their time source.
//! [`FpsCounter`] turns frame ticks into a frames-per-second figure that is
//! refreshed once per interval.

use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Seconds since the clock was created or reset.
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

impl FrameTime {
    /// Snapshot at a fixed time, mostly useful in tests.
    pub fn at(elapsed: f32, dt: f32) -> Self {
        Self { dt, elapsed, frame_index: 0 }
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stall (window drag, debugger) doesn't teleport
/// the camera.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (100µs to 250ms).
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

    /// Resets the delta baseline without touching elapsed time.
    ///
    /// Used after the event loop was suspended.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Seconds since the clock was created.
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
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

/// Frames-per-second counter
#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval: f32,
    window_start: Option<f32>,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::with_interval(1.0)
    }

    /// Counter that refreshes every `interval` seconds
    pub fn with_interval(interval: f32) -> Self {
        Self {
            interval,
            window_start: None,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Count one frame at time `now` (seconds) and return the current rate.
    ///
    /// The rate is recomputed as `frames / elapsed` once more than one
    /// interval has passed since the window started; until then the previous
    /// value is returned.
    pub fn tick(&mut self, now: f32) -> f32 {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now - start;
        if elapsed > self.interval {
            self.fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.window_start = Some(now);
        }

        self.fps
    }

    /// Last computed rate
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
