//! Transform sinks: where frames go instead of a GPU renderer.
//!
//! A sink only reads the frames it is handed. [`TracingSink`] logs a summary
//! every N frames; [`JsonLinesSink`] writes one JSON object per frame for
//! offline plotting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::host::SketchFrame;

/// Errors raised by a sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Writing to the underlying file or stream failed.
    #[error("sink I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A frame could not be encoded.
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Consumer of per-frame transforms.
pub trait TransformSink {
    /// Receive one frame.
    fn submit(&mut self, frame: &SketchFrame) -> Result<(), SinkError>;

    /// Flush buffered output at the end of a run.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Logs every `every`th frame at info level.
#[derive(Debug, Clone)]
pub struct TracingSink {
    every: u64,
}

impl TracingSink {
    /// Log every `every` frames; zero disables logging.
    pub fn new(every: u64) -> Self {
        Self { every }
    }

    fn wants(&self, frame: u64) -> bool {
        self.every != 0 && frame % self.every == 0
    }
}

impl TransformSink for TracingSink {
    fn submit(&mut self, frame: &SketchFrame) -> Result<(), SinkError> {
        if !self.wants(frame.frame) {
            return Ok(());
        }
        if let Some(orbit) = &frame.orbit {
            let s = orbit.seeker.position;
            let f = orbit.follower.position;
            info!(
                frame = frame.frame,
                elapsed = frame.elapsed,
                "seeker=({:.3}, {:.3}, {:.3}) follower=({:.3}, {:.3}, {:.3}) gap={:.3}",
                s.x,
                s.y,
                s.z,
                f.x,
                f.y,
                f.z,
                s.distance(f),
            );
        }
        if let Some(spinner) = &frame.spinner {
            info!(
                frame = frame.frame,
                elapsed = frame.elapsed,
                "spinner angle={:.3} speed={:.2} sway={:.3}",
                spinner.spinner_angle,
                spinner.rotation_speed,
                spinner.sway_yaw,
            );
        }
        Ok(())
    }
}

/// Writes each frame as a JSON object on its own line.
pub struct JsonLinesSink<W: Write> {
    writer: BufWriter<W>,
    lines: u64,
}

impl JsonLinesSink<File> {
    /// Create (or truncate) a trace file.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Wrap any writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
            lines: 0,
        }
    }

    /// Number of frames written so far.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Flush and return the inner writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Io(e.into_error()))
    }
}

impl<W: Write> TransformSink for JsonLinesSink<W> {
    fn submit(&mut self, frame: &SketchFrame) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}
