//! Display-frame clock for the headless host.
//!
//! A browser calls its animation callback once per display refresh with the
//! seconds elapsed since the sketch started. [`FrameClock`] reproduces that:
//! one tick per frame, a monotonically non-decreasing elapsed time, and
//! oversized frame times clamped so a stall does not fling the sketch ahead.

use std::time::{Duration, Instant};
use tracing::warn;

/// Maximum frame time clamp. Longer frames are treated as this long.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// One display frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Zero-based frame index.
    pub frame: u64,
    /// Seconds since the sketch started.
    pub elapsed: f64,
    /// Seconds since the previous frame (zero for the first).
    pub dt: f64,
}

/// Frame counter and elapsed-time accumulator.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_dt: f64,
    elapsed: f64,
    frame_count: u64,
    started: bool,
}

impl FrameClock {
    /// Clock for a display refreshing at `fps`. The first frame is at zero.
    pub fn new(fps: u32) -> Self {
        Self {
            frame_dt: 1.0 / fps.max(1) as f64,
            elapsed: 0.0,
            frame_count: 0,
            started: false,
        }
    }

    /// Clock continuing after a frame at `elapsed`: the first tick lands one
    /// frame later.
    pub fn resume_from(fps: u32, elapsed: f64) -> Self {
        Self {
            elapsed,
            started: true,
            ..Self::new(fps)
        }
    }

    /// Nominal seconds per frame.
    pub fn frame_dt(&self) -> f64 {
        self.frame_dt
    }

    /// Advance one frame of nominal length.
    pub fn tick_fixed(&mut self) -> FrameTick {
        self.tick(self.frame_dt)
    }

    /// Advance one frame that took `frame_time` seconds.
    ///
    /// Negative frame times are treated as zero, so elapsed never decreases.
    pub fn tick(&mut self, frame_time: f64) -> FrameTick {
        let mut dt = frame_time.max(0.0);
        if dt > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                dt * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            dt = MAX_FRAME_TIME;
        }

        if self.started {
            self.elapsed += dt;
        } else {
            self.started = true;
            dt = 0.0;
        }

        let tick = FrameTick {
            frame: self.frame_count,
            elapsed: self.elapsed,
            dt,
        };
        self.frame_count += 1;
        tick
    }

    /// Returns the total number of frames ticked.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns the elapsed time of the most recent frame.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

/// Sleeps until the next frame deadline and reports the measured frame time.
#[derive(Debug)]
pub struct RealtimePacer {
    frame: Duration,
    previous: Instant,
}

impl RealtimePacer {
    /// Pacer targeting `fps` frames per second.
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            previous: Instant::now(),
        }
    }

    /// Block until a frame period has passed since the last call, then
    /// return the actual seconds since the last call.
    pub fn wait(&mut self) -> f64 {
        let deadline = self.previous + self.frame;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        let current = Instant::now();
        let frame_time = current.duration_since(self.previous).as_secs_f64();
        self.previous = current;
        frame_time
    }
}
