//! The headless sketch host.
//!
//! Plays the role of the page: owns the controllers and the input port,
//! ticks the frame clock, calls each controller once per frame, and passes
//! the resulting transforms to every registered sink.

use std::str::FromStr;
use std::time::Duration;

use orbit_config::{Config, DemoSelection};
use orbit_input::{InputPort, ResizeOutcome, SketchInput};
use orbit_motion::{
    OrbitFrame, OrbitMotionController, OrbitState, SpinnerController, SpinnerPose,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::AppError;
use crate::frame_clock::{FrameClock, FrameTick, RealtimePacer};
use crate::sink::TransformSink;

/// Everything the host produced for one display frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SketchFrame {
    /// Zero-based frame index of this run.
    pub frame: u64,
    /// Seconds since the sketch started.
    pub elapsed: f64,
    /// Orbit transforms, when the orbit sketch is running.
    pub orbit: Option<OrbitFrame>,
    /// Spinner pose, when the fan sketch is running.
    pub spinner: Option<SpinnerPose>,
}

/// A simulated pointer hold from `from` (inclusive) to `to` (exclusive),
/// in elapsed seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldWindow {
    /// Press time.
    pub from: f64,
    /// Release time.
    pub to: f64,
}

impl HoldWindow {
    /// Whether the pointer is held at `elapsed`.
    pub fn contains(&self, elapsed: f64) -> bool {
        (self.from..self.to).contains(&elapsed)
    }
}

impl FromStr for HoldWindow {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidHold(s.to_string());
        let (from, to) = s.split_once(':').ok_or_else(invalid)?;
        let from: f64 = from.trim().parse().map_err(|_| invalid())?;
        let to: f64 = to.trim().parse().map_err(|_| invalid())?;
        if !from.is_finite() || !to.is_finite() || from >= to {
            return Err(invalid());
        }
        Ok(Self { from, to })
    }
}

/// Totals reported at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames produced.
    pub frames: u64,
    /// Elapsed seconds at the last frame.
    pub elapsed: f64,
    /// Pointer presses seen.
    pub presses: u64,
    /// Final orbit state, when the orbit sketch ran.
    pub orbit_state: Option<OrbitState>,
}

/// Drives the selected sketches frame by frame.
pub struct SketchHost {
    input: SketchInput,
    orbit: Option<OrbitMotionController>,
    spinner: Option<SpinnerController>,
    clock: FrameClock,
    pacer: Option<RealtimePacer>,
    hold: Option<HoldWindow>,
    frames: u64,
    sinks: Vec<Box<dyn TransformSink>>,
}

impl SketchHost {
    /// Build controllers for the configured demo selection.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        if config.host.target_fps == 0 {
            return Err(AppError::InvalidHost("target_fps must be at least 1"));
        }

        let demo = config.host.demo;
        let orbit = matches!(demo, DemoSelection::Orbit | DemoSelection::All)
            .then(|| OrbitMotionController::new(config.orbit.clone()))
            .transpose()?;
        let spinner = matches!(demo, DemoSelection::Spinner | DemoSelection::All)
            .then(|| SpinnerController::new(config.spinner.clone()))
            .transpose()?;

        let input = SketchInput::new(&config.viewport);
        info!(
            demo = ?demo,
            fps = config.host.target_fps,
            frames = config.host.frames,
            aspect = input.viewport.aspect(),
            "sketch host ready"
        );

        Ok(Self {
            input,
            orbit,
            spinner,
            clock: FrameClock::new(config.host.target_fps),
            pacer: config
                .host
                .realtime
                .then(|| RealtimePacer::new(config.host.target_fps)),
            hold: None,
            frames: config.host.frames,
            sinks: Vec::new(),
        })
    }

    /// Continue the orbit sketch from a snapshot; the first frame lands one
    /// frame after the snapshot's elapsed time.
    pub fn resume(mut self, state: OrbitState, fps: u32) -> Result<Self, AppError> {
        match self.orbit.as_mut() {
            Some(orbit) => {
                orbit.restore(state)?;
                self.clock = FrameClock::resume_from(fps, state.elapsed);
                info!(
                    elapsed = state.elapsed,
                    longitude = state.longitude,
                    "resuming orbit sketch"
                );
            }
            None => warn!("snapshot given but the orbit sketch is not running; ignoring"),
        }
        Ok(self)
    }

    /// Simulate a pointer hold during `window`.
    pub fn with_hold(mut self, window: HoldWindow) -> Self {
        self.hold = Some(window);
        self
    }

    /// Register a sink. Sinks receive frames in registration order.
    pub fn add_sink(&mut self, sink: Box<dyn TransformSink>) {
        self.sinks.push(sink);
    }

    /// The input port, for hosts that forward real events.
    pub fn input_mut(&mut self) -> &mut SketchInput {
        &mut self.input
    }

    /// The input state as of the last frame.
    pub fn input(&self) -> &SketchInput {
        &self.input
    }

    /// Current orbit state, if the orbit sketch is running.
    pub fn orbit_state(&self) -> Option<&OrbitState> {
        self.orbit.as_ref().map(OrbitMotionController::state)
    }

    /// Produce one frame.
    pub fn step(&mut self) -> Result<SketchFrame, AppError> {
        let tick = match self.pacer.as_mut() {
            Some(pacer) => {
                let frame_time = pacer.wait();
                self.clock.tick(frame_time)
            }
            None => self.clock.tick_fixed(),
        };
        self.step_at(tick)
    }

    fn step_at(&mut self, tick: FrameTick) -> Result<SketchFrame, AppError> {
        if let Some(hold) = self.hold {
            let held = hold.contains(tick.elapsed);
            if held != self.input.pointer.is_active() {
                self.input.on_pointer_active(held);
            }
        }

        let now = Duration::try_from_secs_f64(tick.elapsed)
            .map_err(|_| AppError::InvalidHost("frame time is negative or out of range"))?;
        if let ResizeOutcome::Resized { width, height } = self.input.viewport.poll(now) {
            info!(
                width,
                height,
                aspect = self.input.viewport.aspect(),
                "viewport resized"
            );
        }

        let pointer_active = self.input.pointer.is_active();
        let frame = SketchFrame {
            frame: tick.frame,
            elapsed: tick.elapsed,
            orbit: self.orbit.as_mut().map(|o| o.advance(tick.elapsed)),
            spinner: self
                .spinner
                .as_mut()
                .map(|s| s.advance(tick.elapsed, pointer_active)),
        };

        for sink in &mut self.sinks {
            sink.submit(&frame)?;
        }
        self.input.pointer.clear_transients();
        Ok(frame)
    }

    /// Run the configured number of frames, then flush every sink.
    pub fn run(&mut self) -> Result<RunSummary, AppError> {
        let mut last_elapsed = self.clock.elapsed();
        for _ in 0..self.frames {
            last_elapsed = self.step()?.elapsed;
        }
        for sink in &mut self.sinks {
            sink.finish()?;
        }

        let summary = RunSummary {
            frames: self.clock.frame_count(),
            elapsed: last_elapsed,
            presses: self.input.pointer.press_count(),
            orbit_state: self.orbit_state().copied(),
        };
        debug!(?summary, "run finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SinkError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Clone)]
    struct Collect(Rc<RefCell<Vec<SketchFrame>>>);

    impl TransformSink for Collect {
        fn submit(&mut self, frame: &SketchFrame) -> Result<(), SinkError> {
            self.0.borrow_mut().push(*frame);
            Ok(())
        }
    }

    fn config(demo: DemoSelection, frames: u64) -> Config {
        let mut config = Config::default();
        config.host.demo = demo;
        config.host.frames = frames;
        config
    }

    #[test]
    fn test_hold_window_parse() {
        let hold: HoldWindow = "1.5:3".parse().unwrap();
        assert_eq!(hold, HoldWindow { from: 1.5, to: 3.0 });
        assert!(hold.contains(1.5));
        assert!(!hold.contains(3.0));
        for bad in ["", "1", "3:1", "a:b", "1:inf"] {
            assert!(bad.parse::<HoldWindow>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_orbit_only_run() {
        let mut host = SketchHost::new(&config(DemoSelection::Orbit, 120)).unwrap();
        let frames = Collect::default();
        host.add_sink(Box::new(frames.clone()));

        let summary = host.run().unwrap();
        assert_eq!(summary.frames, 120);
        assert!((summary.elapsed - 119.0 / 60.0).abs() < 1e-9);

        let frames = frames.0.borrow();
        assert_eq!(frames.len(), 120);
        assert!(frames.iter().all(|f| f.orbit.is_some() && f.spinner.is_none()));
        assert_eq!(frames[0].elapsed, 0.0);
        assert_eq!(summary.orbit_state.unwrap().longitude, 120.0);
    }

    #[test]
    fn test_hold_boosts_spinner() {
        let hold = "0.5:1.0".parse().unwrap();
        let mut host = SketchHost::new(&config(DemoSelection::Spinner, 90))
            .unwrap()
            .with_hold(hold);
        let frames = Collect::default();
        host.add_sink(Box::new(frames.clone()));

        let summary = host.run().unwrap();
        assert_eq!(summary.presses, 1);
        assert!(summary.orbit_state.is_none());

        for frame in frames.0.borrow().iter() {
            let pose = frame.spinner.unwrap();
            let expected = if hold.contains(frame.elapsed) { 10.0 } else { 0.25 };
            assert_eq!(pose.rotation_speed, expected, "t = {}", frame.elapsed);
        }
    }

    #[test]
    fn test_resize_applied_after_debounce() {
        let mut host = SketchHost::new(&config(DemoSelection::All, 0)).unwrap();
        host.input_mut()
            .on_resize(800, 400, Duration::from_secs_f64(0.0));
        for _ in 0..5 {
            host.step().unwrap();
        }
        assert_eq!(host.input().viewport.aspect(), 1280.0 / 720.0);
        for _ in 0..5 {
            host.step().unwrap();
        }
        assert_eq!(host.input().viewport.aspect(), 2.0);
    }

    #[test]
    fn test_resume_matches_uninterrupted_run() {
        let mut straight = SketchHost::new(&config(DemoSelection::Orbit, 200)).unwrap();
        let straight_summary = straight.run().unwrap();

        let mut first = SketchHost::new(&config(DemoSelection::Orbit, 80)).unwrap();
        let snapshot = first.run().unwrap().orbit_state.unwrap();
        let restored = OrbitState::from_ron(&snapshot.to_ron().unwrap()).unwrap();

        let mut second = SketchHost::new(&config(DemoSelection::Orbit, 120))
            .unwrap()
            .resume(restored, 60)
            .unwrap();
        let resumed_summary = second.run().unwrap();

        let a = straight_summary.orbit_state.unwrap();
        let b = resumed_summary.orbit_state.unwrap();
        assert_eq!(a.longitude, b.longitude);
        assert!((a.elapsed - b.elapsed).abs() < 1e-9);
        assert!((a.seeker.position - b.seeker.position).length() < 1e-9);
        assert!((a.follower.position - b.follower.position).length() < 1e-9);
    }

    #[test]
    fn test_resume_rejects_negative_elapsed() {
        let mut state = OrbitState::initial(&Config::default().orbit);
        state.elapsed = -5.0;
        let restored = OrbitState::from_ron(&state.to_ron().unwrap()).unwrap();

        let result = SketchHost::new(&config(DemoSelection::Orbit, 10))
            .unwrap()
            .resume(restored, 60);
        assert!(matches!(result, Err(AppError::Motion(_))));
    }

    #[test]
    fn test_step_before_time_zero_is_an_error() {
        let mut host = SketchHost::new(&config(DemoSelection::Spinner, 0)).unwrap();
        let tick = FrameTick {
            frame: 0,
            elapsed: -1.0,
            dt: 1.0 / 60.0,
        };
        assert!(matches!(
            host.step_at(tick),
            Err(AppError::InvalidHost(_))
        ));
    }

    #[test]
    fn test_zero_fps_rejected() {
        let mut config = Config::default();
        config.host.target_fps = 0;
        assert!(matches!(
            SketchHost::new(&config),
            Err(AppError::InvalidHost(_))
        ));
    }

    #[test]
    fn test_invalid_orbit_config_surfaces() {
        let mut config = Config::default();
        config.orbit.damping_step = -1.0;
        assert!(matches!(SketchHost::new(&config), Err(AppError::Motion(_))));
    }
}
