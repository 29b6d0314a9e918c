use crate::coords::Vec2;

use super::types::InputEvent;

/// Everything that happened since the last frame. Cleared by the runtime
/// after the app has seen it.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Arrival order is preserved; consumers replay it.
    pub events: Vec<InputEvent>,
    /// Summed pointer motion in logical pixels.
    pub pointer_delta: Vec2,
    pub close_requested: bool,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.pointer_delta = Vec2::zero();
        self.close_requested = false;
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }
}
