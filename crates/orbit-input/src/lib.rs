//! Host input port: the events a page would deliver to a sketch, without
//! any dependency on a global event bus.
//!
//! Hosts forward resize and pointer events through [`InputPort`]; sketches
//! read a settled [`Viewport`] and the [`PointerState`] each frame.

pub mod pointer;
pub mod viewport;

use std::time::Duration;

pub use pointer::{PointerEvent, PointerState};
pub use viewport::{ResizeOutcome, Viewport};

/// Events a host forwards to a running sketch.
pub trait InputPort {
    /// The drawing surface changed size. `now` is host time since start.
    fn on_resize(&mut self, width: u32, height: u32, now: Duration);

    /// The pointer (mouse button or touch) went down or up.
    fn on_pointer_active(&mut self, active: bool);
}

/// Viewport plus pointer: everything a sketch reads from its host.
#[derive(Debug, Clone)]
pub struct SketchInput {
    /// Debounced drawing-surface size.
    pub viewport: Viewport,
    /// Pointer press state.
    pub pointer: PointerState,
}

impl SketchInput {
    /// Input state for a surface of the configured initial size.
    pub fn new(config: &orbit_config::ViewportConfig) -> Self {
        Self {
            viewport: Viewport::new(config),
            pointer: PointerState::new(),
        }
    }
}

impl InputPort for SketchInput {
    fn on_resize(&mut self, width: u32, height: u32, now: Duration) {
        self.viewport.on_resize(width, height, now);
    }

    fn on_pointer_active(&mut self, active: bool) {
        let event = if active {
            PointerEvent::Down
        } else {
            PointerEvent::Up
        };
        self.pointer.on_event(event);
    }
}
