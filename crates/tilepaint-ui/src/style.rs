use tilepaint_engine::raster::Rgba;

/// Colors and metrics for panels and buttons. Text sizes are in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub panel_bg: Rgba,
    pub title_bar_bg: Rgba,
    pub title_bar_text: Rgba,
    pub title_bar_text_size: f32,
    pub title_bar_height: f32,

    pub button_bg: Rgba,
    pub button_hover_bg: Rgba,
    pub button_text: Rgba,
    pub button_hover_text: Rgba,
    pub button_text_size: f32,
    /// Label inset from the button's left edge; labels are centered vertically.
    pub button_padding: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            panel_bg: Rgba::rgb(127, 63, 0),
            title_bar_bg: Rgba::WHITE,
            title_bar_text: Rgba::BLACK,
            title_bar_text_size: 14.0,
            title_bar_height: 20.0,

            button_bg: Rgba::rgb(63, 0, 0),
            button_hover_bg: Rgba::rgb(255, 127, 63),
            button_text: Rgba::WHITE,
            button_hover_text: Rgba::WHITE,
            button_text_size: 13.0,
            button_padding: 6.0,
        }
    }
}

impl Style {
    /// Style of the "x" button in a panel's title bar.
    pub fn close_button(&self) -> Style {
        Style {
            button_bg: Rgba::WHITE,
            button_hover_bg: Rgba::rgb(255, 0, 0),
            button_text: Rgba::BLACK,
            button_hover_text: Rgba::WHITE,
            button_text_size: self.title_bar_text_size,
            button_padding: 6.0,
            ..self.clone()
        }
    }

    /// Compact buttons for the status bar.
    pub fn small_button(&self) -> Style {
        Style {
            button_text_size: 11.0,
            button_padding: 3.0,
            ..self.clone()
        }
    }

    /// Background and label colors for a button in the given hover state.
    pub fn button_colors(&self, hovered: bool) -> (Rgba, Rgba) {
        if hovered {
            (self.button_hover_bg, self.button_hover_text)
        } else {
            (self.button_bg, self.button_text)
        }
    }
}
