use tilepaint_engine::input::{InputEvent, MouseButton, MouseButtonState, PointerButtonEvent};

/// Discrete input events routed through the scene graph.
///
/// Pointer motion is not an event here; the router applies the frame's
/// accumulated delta once per frame after the discrete events.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UiEvent {
    LeftDown,
    LeftUp,
    /// Starts panning when pressed over a paint surface.
    RightDown,
    RightUp,
    /// Samples the color under the cursor.
    MiddleDown,
    /// Wheel motion in notches; positive zooms in.
    Wheel { lines: f32 },
}

impl UiEvent {
    /// Maps an engine input event; events the scene does not route give `None`.
    pub fn from_input(event: &InputEvent) -> Option<UiEvent> {
        match event {
            InputEvent::PointerButton(PointerButtonEvent { button, state, .. }) => {
                let down = *state == MouseButtonState::Pressed;
                match (button, down) {
                    (MouseButton::Left, true) => Some(UiEvent::LeftDown),
                    (MouseButton::Left, false) => Some(UiEvent::LeftUp),
                    (MouseButton::Right, true) => Some(UiEvent::RightDown),
                    (MouseButton::Right, false) => Some(UiEvent::RightUp),
                    (MouseButton::Middle, true) => Some(UiEvent::MiddleDown),
                    _ => None,
                }
            }
            InputEvent::MouseWheel { delta, .. } => {
                let lines = delta.lines_y();
                (lines != 0.0).then_some(UiEvent::Wheel { lines })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepaint_engine::input::{Modifiers, MouseWheelDelta};

    fn press(button: MouseButton, state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state,
            x: 0.0,
            y: 0.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn maps_buttons() {
        assert_eq!(
            UiEvent::from_input(&press(MouseButton::Left, MouseButtonState::Pressed)),
            Some(UiEvent::LeftDown)
        );
        assert_eq!(
            UiEvent::from_input(&press(MouseButton::Right, MouseButtonState::Released)),
            Some(UiEvent::RightUp)
        );
        assert_eq!(UiEvent::from_input(&press(MouseButton::Middle, MouseButtonState::Released)), None);
        assert_eq!(UiEvent::from_input(&press(MouseButton::Other(3), MouseButtonState::Pressed)), None);
    }

    #[test]
    fn maps_wheel_and_skips_horizontal() {
        let modifiers = Modifiers::default();
        let up = InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 }, modifiers };
        assert_eq!(UiEvent::from_input(&up), Some(UiEvent::Wheel { lines: 1.0 }));
        let sideways = InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 2.0, y: 0.0 }, modifiers };
        assert_eq!(UiEvent::from_input(&sideways), None);
        assert_eq!(UiEvent::from_input(&InputEvent::PointerLeft), None);
    }
}
