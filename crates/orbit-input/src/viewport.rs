//! Debounced drawing-surface size.
//!
//! Resize events arrive in bursts while a window is dragged. [`Viewport`]
//! holds the latest request until the host has been quiet for the debounce
//! period, then applies it unless the width barely changed (mobile browsers
//! fire resizes when their toolbars slide in and out).

use std::time::Duration;

use glam::UVec2;
use orbit_config::ViewportConfig;
use tracing::{debug, warn};

/// Result of polling a [`Viewport`] for settled resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// No resize requested.
    Idle,
    /// A resize is waiting out the debounce period.
    Pending,
    /// A settled resize was discarded (width within threshold, or zero height).
    Ignored,
    /// The viewport now has this size.
    Resized {
        /// New width in logical pixels.
        width: u32,
        /// New height in logical pixels.
        height: u32,
    },
}

#[derive(Debug, Clone, Copy)]
struct PendingResize {
    size: UVec2,
    requested_at: Duration,
}

/// Drawing-surface size with resize debouncing.
#[derive(Debug, Clone)]
pub struct Viewport {
    size: UVec2,
    pending: Option<PendingResize>,
    debounce: Duration,
    threshold_px: u32,
}

impl Viewport {
    /// Viewport at the configured initial size.
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            size: UVec2::new(config.width, config.height.max(1)),
            pending: None,
            debounce: Duration::from_millis(config.resize_debounce_ms),
            threshold_px: config.resize_threshold_px,
        }
    }

    /// Record a resize request. A newer request replaces an older pending
    /// one and restarts the debounce timer.
    pub fn on_resize(&mut self, width: u32, height: u32, now: Duration) {
        self.pending = Some(PendingResize {
            size: UVec2::new(width, height),
            requested_at: now,
        });
    }

    /// Apply the pending resize if the debounce period has elapsed.
    pub fn poll(&mut self, now: Duration) -> ResizeOutcome {
        let Some(pending) = self.pending else {
            return ResizeOutcome::Idle;
        };
        if now.saturating_sub(pending.requested_at) < self.debounce {
            return ResizeOutcome::Pending;
        }
        self.pending = None;

        if pending.size.x.abs_diff(self.size.x) <= self.threshold_px {
            debug!(width = pending.size.x, current = self.size.x, "resize below threshold");
            return ResizeOutcome::Ignored;
        }
        if pending.size.y == 0 {
            warn!(width = pending.size.x, "ignoring resize to zero height");
            return ResizeOutcome::Ignored;
        }

        self.size = pending.size;
        debug!(width = self.size.x, height = self.size.y, "viewport resized");
        ResizeOutcome::Resized {
            width: self.size.x,
            height: self.size.y,
        }
    }

    /// Current settled size.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Width over height, for a perspective camera.
    pub fn aspect(&self) -> f64 {
        self.size.x as f64 / self.size.y as f64
    }

    /// Height over width.
    pub fn inverse_aspect(&self) -> f64 {
        self.size.y as f64 / self.size.x.max(1) as f64
    }
}
