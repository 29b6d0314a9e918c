use tilepaint_engine::input::{InputEvent, InputFrame, Key, KeyState, Modifiers};

/// Editor commands reachable from the keyboard.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shortcut {
    Open,
    Save,
    SaveAs,
    Exit,
}

impl Shortcut {
    /// Binding for a key press; the command modifier is Ctrl, or Cmd on macOS.
    pub fn from_key(key: Key, modifiers: Modifiers) -> Option<Shortcut> {
        match key {
            Key::Escape => Some(Shortcut::Exit),
            Key::O if modifiers.command() => Some(Shortcut::Open),
            Key::S if modifiers.command() && modifiers.shift => Some(Shortcut::SaveAs),
            Key::S if modifiers.command() => Some(Shortcut::Save),
            _ => None,
        }
    }
}

/// Shortcuts triggered this frame, in press order. Key repeats are ignored.
pub fn collect(frame: &InputFrame) -> Vec<Shortcut> {
    frame
        .events
        .iter()
        .filter_map(|ev| match ev {
            InputEvent::Key { key, state: KeyState::Pressed, modifiers, repeat: false, .. } => {
                Shortcut::from_key(*key, *modifiers)
            }
            _ => None,
        })
        .collect()
}
