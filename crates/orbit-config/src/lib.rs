//! Configuration system for Orbit Sketch.
//!
//! Every tunable constant of the sketch controllers lives here with a
//! documented default. Settings persist to disk as RON, accept CLI overrides
//! via clap, and deserialize forward/backward compatibly.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, DemoSelection, DirectionMode, HostConfig, OrbitConfig, SpinnerConfig,
    ViewportConfig,
};
pub use error::ConfigError;
