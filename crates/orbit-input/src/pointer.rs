//! Pointer press state shared by mouse and touch.

use tracing::trace;

/// Press/release events from either a mouse button or a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Mouse down or touch start.
    Down,
    /// Mouse up or touch end.
    Up,
}

/// Whether the pointer is currently held, with press edge tracking.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    active: bool,
    just_pressed: bool,
    just_released: bool,
    press_count: u64,
}

impl PointerState {
    /// Pointer up, no presses seen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a press or release. Repeated events of the same kind are
    /// idempotent.
    pub fn on_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down if !self.active => {
                self.active = true;
                self.just_pressed = true;
                self.press_count += 1;
                trace!(presses = self.press_count, "pointer down");
            }
            PointerEvent::Up if self.active => {
                self.active = false;
                self.just_released = true;
                trace!("pointer up");
            }
            _ => {}
        }
    }

    /// Whether the pointer is held.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the pointer went down since the last [`clear_transients`](Self::clear_transients).
    pub fn just_pressed(&self) -> bool {
        self.just_pressed
    }

    /// Whether the pointer went up since the last [`clear_transients`](Self::clear_transients).
    pub fn just_released(&self) -> bool {
        self.just_released
    }

    /// Total presses since creation.
    pub fn press_count(&self) -> u64 {
        self.press_count
    }

    /// Reset per-frame edges. Call at the end of each frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}
