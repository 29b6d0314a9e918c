use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{Key as LogicalKey, KeyCode, ModifiersState, NamedKey, PhysicalKey};

use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta,
    PointerButtonEvent, PointerMoveEvent,
};

/// Converts a winit window event into an [`InputEvent`], positions in
/// logical pixels for the window's `scale` factor. Window events with no
/// input meaning (resize, redraw, focus) give `None`; the runtime handles
/// those itself.
pub(crate) fn translate_window_event(scale: f64, state: &InputState, event: &WindowEvent) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::CloseRequested => InputEvent::CloseRequested,
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(modifiers(m.state())),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical(scale, *position);
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
        }

        WindowEvent::MouseInput { state: element, button, .. } => {
            // Buttons carry no position in winit; stamp the tracked one.
            let at = state.pointer_or_origin();
            InputEvent::PointerButton(PointerButtonEvent {
                button: mouse_button(*button),
                state: match element {
                    ElementState::Pressed => MouseButtonState::Pressed,
                    ElementState::Released => MouseButtonState::Released,
                },
                x: at.x,
                y: at.y,
                modifiers: state.modifiers,
            })
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match *delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x, y },
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = logical(scale, p);
                    MouseWheelDelta::Pixel { x, y }
                }
            };
            InputEvent::MouseWheel { delta, modifiers: state.modifiers }
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let (key, code) = key(&event.logical_key, event.physical_key);
            InputEvent::Key {
                key,
                state: match event.state {
                    ElementState::Pressed => KeyState::Pressed,
                    ElementState::Released => KeyState::Released,
                },
                modifiers: state.modifiers,
                code,
                repeat: event.repeat,
            }
        }

        _ => return None,
    };
    Some(ev)
}

fn logical(scale: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let pos = pos.to_logical::<f64>(scale);
    (pos.x as f32, pos.y as f32)
}

fn modifiers(m: ModifiersState) -> Modifiers {
    Modifiers { shift: m.shift_key(), ctrl: m.control_key(), alt: m.alt_key(), meta: m.super_key() }
}

fn mouse_button(b: WinitButton) -> MouseButton {
    match b {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Other(3),
        WinitButton::Forward => MouseButton::Other(4),
        WinitButton::Other(n) => MouseButton::Other(n),
    }
}

/// Letters follow the layout's logical key so shortcuts match the printed
/// letter; the physical code is the fallback and is always reported.
fn key(logical: &LogicalKey, physical: PhysicalKey) -> (Key, u32) {
    let code = match physical {
        PhysicalKey::Code(code) => code as u32,
        PhysicalKey::Unidentified(_) => 0,
    };
    let key = match logical {
        LogicalKey::Named(NamedKey::Escape) => Key::Escape,
        LogicalKey::Character(c) if c.eq_ignore_ascii_case("o") => Key::O,
        LogicalKey::Character(c) if c.eq_ignore_ascii_case("s") => Key::S,
        LogicalKey::Character(_) | LogicalKey::Named(_) => Key::Unknown(code),
        _ => match physical {
            PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
            PhysicalKey::Code(KeyCode::KeyO) => Key::O,
            PhysicalKey::Code(KeyCode::KeyS) => Key::S,
            _ => Key::Unknown(code),
        },
    };
    (key, code)
}
