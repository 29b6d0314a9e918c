use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Modifiers, PointerButtonEvent, PointerMoveEvent};

/// Modifier keys and pointer position for one window.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    /// Logical pixels; `None` while the pointer is outside the window.
    pub pointer_pos: Option<Vec2>,
}

impl InputState {
    /// Folds `ev` into the state, accumulates motion into `frame` and
    /// appends the event to it.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                let pos = Vec2::new(*x, *y);
                // Entering the window is a jump, not motion.
                if let Some(prev) = self.pointer_pos {
                    frame.pointer_delta += pos - prev;
                }
                self.pointer_pos = Some(pos);
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::PointerButton(PointerButtonEvent { x, y, modifiers, .. }) => {
                self.pointer_pos = Some(Vec2::new(*x, *y));
                self.modifiers = *modifiers;
            }

            InputEvent::Key { modifiers, .. } | InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            InputEvent::CloseRequested => frame.close_requested = true,
        }

        frame.push_event(ev);
    }

    /// Last known pointer position, or the origin when the pointer is outside.
    pub fn pointer_or_origin(&self) -> Vec2 {
        self.pointer_pos.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseButton, MouseButtonState};

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn button(button: MouseButton, state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            x: 5.0,
            y: 6.0,
            modifiers: Modifiers::default(),
        })
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn pointer_delta_accumulates_within_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, moved(10.0, 10.0));
        assert_eq!(frame.pointer_delta, Vec2::zero());
        state.apply_event(&mut frame, moved(13.0, 8.0));
        state.apply_event(&mut frame, moved(15.0, 9.0));
        assert_eq!(frame.pointer_delta, Vec2::new(5.0, -1.0));
        frame.clear();
        assert_eq!(frame.pointer_delta, Vec2::zero());
        assert!(frame.events.is_empty());
    }

    #[test]
    fn reentry_is_not_motion() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, moved(10.0, 10.0));
        state.apply_event(&mut frame, InputEvent::PointerLeft);
        assert_eq!(state.pointer_or_origin(), Vec2::zero());
        state.apply_event(&mut frame, moved(100.0, 100.0));
        assert_eq!(frame.pointer_delta, Vec2::zero());
        assert_eq!(state.pointer_pos, Some(Vec2::new(100.0, 100.0)));
    }

    // ── buttons ───────────────────────────────────────────────────────────

    #[test]
    fn buttons_carry_pointer_position() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, moved(40.0, 40.0));
        state.apply_event(&mut frame, button(MouseButton::Left, MouseButtonState::Pressed));
        assert_eq!(state.pointer_pos, Some(Vec2::new(5.0, 6.0)));

        state.apply_event(&mut frame, button(MouseButton::Left, MouseButtonState::Released));
        assert_eq!(frame.events.len(), 3);
        assert_eq!(state.pointer_pos, Some(Vec2::new(5.0, 6.0)));
    }

    // ── window ────────────────────────────────────────────────────────────

    #[test]
    fn close_request_flags_frame() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::CloseRequested);
        assert!(frame.close_requested);
        assert_eq!(frame.events.len(), 1);
    }
}
