//! Command-line argument parsing for Orbit Sketch.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, DemoSelection, DirectionMode};

/// Orbit Sketch command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orbit-sketch", about = "Headless host for the orbit and fan sketches")]
pub struct CliArgs {
    /// Demo controllers to drive.
    #[arg(long, value_enum)]
    pub demo: Option<DemoSelection>,

    /// Number of display frames to run.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Simulated display refresh rate.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Pace frames against the wall clock.
    #[arg(long)]
    pub realtime: Option<bool>,

    /// Seeker heading behavior.
    #[arg(long, value_enum)]
    pub direction_mode: Option<DirectionMode>,

    /// Follower pull strength.
    #[arg(long)]
    pub pull_strength: Option<f64>,

    /// Hold the pointer down between two elapsed times, e.g. `2.0:3.5`.
    #[arg(long)]
    pub hold: Option<String>,

    /// Write one JSON object per frame to this file (relative to the data
    /// directory).
    #[arg(long)]
    pub trace: Option<PathBuf>,

    /// Write the final orbit state to this RON file (relative to the data
    /// directory).
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Start from an orbit state previously written with `--snapshot`.
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(demo) = args.demo {
            self.host.demo = demo;
        }
        if let Some(frames) = args.frames {
            self.host.frames = frames;
        }
        if let Some(fps) = args.fps {
            self.host.target_fps = fps;
        }
        if let Some(realtime) = args.realtime {
            self.host.realtime = realtime;
        }
        if let Some(mode) = args.direction_mode {
            self.orbit.direction_mode = mode;
        }
        if let Some(pull) = args.pull_strength {
            self.orbit.pull_strength = pull;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
