//! Window input, independent of the platform layer.
//!
//! The runtime translates winit events into [`InputEvent`]s and folds them
//! into an [`InputState`] and the current [`InputFrame`].

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta, PointerButtonEvent,
    PointerMoveEvent,
};
