use tilepaint_engine::coords::{Rect, Vec2};
use tilepaint_engine::raster::{PixelBuffer, Rgba};
use tilepaint_engine::text::{FontId, FontSystem};

/// Drawing surface handed to node renderers.
///
/// Wraps the frame's [`PixelBuffer`] with the scene's font and a clip rect.
/// Without a loaded font, text calls draw nothing.
pub struct Painter<'a> {
    pub(crate) target: &'a mut PixelBuffer,
    font_system: &'a FontSystem,
    font: Option<FontId>,
    clip: Rect,
}

impl<'a> Painter<'a> {
    pub(crate) fn new(target: &'a mut PixelBuffer, font_system: &'a FontSystem, font: Option<FontId>) -> Self {
        let clip = target.bounds();
        Self { target, font_system, font, clip }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn clear(&mut self, color: Rgba) {
        self.target.fill(color);
    }

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.target.fill_rect(rect, color, self.clip);
    }

    /// Single line of text with its top-left at `origin`.
    pub fn text(&mut self, text: &str, size: f32, color: Rgba, origin: Vec2) {
        let Some(font) = self.font else {
            return;
        };
        if text.is_empty() {
            return;
        }
        self.font_system.draw_text(self.target, text, font, size, color, origin, self.clip);
    }

    /// Width and height of `text` at `size`.
    pub fn measure_text(&self, text: &str, size: f32) -> Vec2 {
        match self.font {
            Some(font) => self.font_system.measure_text(text, font, size),
            None => Vec2::new(0.0, size),
        }
    }
}
