//! Orbit Sketch host: drives the sketch controllers one display frame at a
//! time and hands their transforms to pluggable sinks in place of a renderer.

pub mod error;
pub mod frame_clock;
pub mod host;
pub mod platform;
pub mod sink;

pub use error::AppError;
pub use frame_clock::{FrameClock, FrameTick, RealtimePacer};
pub use host::{HoldWindow, RunSummary, SketchFrame, SketchHost};
pub use sink::{JsonLinesSink, SinkError, TracingSink, TransformSink};
