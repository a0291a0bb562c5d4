//! Top-level error type for the sketch host.

use std::path::PathBuf;

use orbit_config::ConfigError;
use orbit_motion::MotionError;

use crate::platform::PlatformError;
use crate::sink::SinkError;

/// Anything that can stop the host before or during a run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Config could not be loaded or saved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A controller rejected its configuration or a restored state.
    #[error(transparent)]
    Motion(#[from] MotionError),

    /// A transform sink failed.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Platform directories could not be resolved or created.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// A `--hold` window did not parse.
    #[error("invalid hold window {0:?}: expected <from>:<to> in seconds with from < to")]
    InvalidHold(String),

    /// The host configuration cannot drive a frame loop.
    #[error("invalid host setting: {0}")]
    InvalidHost(&'static str),

    /// A snapshot file could not be read or written.
    #[error("snapshot file {path}: {source}")]
    Snapshot {
        /// File involved.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
