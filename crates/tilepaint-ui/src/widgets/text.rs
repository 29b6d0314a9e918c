use tilepaint_engine::raster::Rgba;

/// Text shown by a [`Text`] node.
pub enum TextContent {
    Literal(String),
    /// Evaluated on every render, e.g. for status readouts.
    Computed(Box<dyn Fn() -> String>),
}

impl TextContent {
    pub fn resolve(&self) -> String {
        match self {
            TextContent::Literal(s) => s.clone(),
            TextContent::Computed(f) => f(),
        }
    }
}

/// A non-interactive single line of text. Never takes hover.
pub struct Text {
    pub(crate) content: TextContent,
    pub(crate) size: f32,
    pub(crate) color: Rgba,
}

impl Text {
    pub fn new(text: impl Into<String>, size: f32, color: Rgba) -> Self {
        Self { content: TextContent::Literal(text.into()), size, color }
    }

    pub fn computed(f: impl Fn() -> String + 'static, size: f32, color: Rgba) -> Self {
        Self { content: TextContent::Computed(Box::new(f)), size, color }
    }

    pub fn resolve(&self) -> String {
        self.content.resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn computed_text_tracks_state() {
        let n = Rc::new(Cell::new(1));
        let src = Rc::clone(&n);
        let text = Text::computed(move || src.get().to_string(), 12.0, Rgba::WHITE);
        assert_eq!(text.resolve(), "1");
        n.set(7);
        assert_eq!(text.resolve(), "7");
    }

    #[test]
    fn literal_text() {
        let text = Text::new("R", 12.0, Rgba::WHITE);
        assert!(matches!(text.content, TextContent::Literal(_)));
        assert_eq!(text.resolve(), "R");
    }
}
