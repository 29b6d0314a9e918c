use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::{Rect, Vec2};
use crate::raster::{PixelBuffer, Rgba};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns the loaded fonts and rasterizes strings straight into a [`PixelBuffer`].
///
/// Glyphs are rasterized on every call; the UI draws a handful of short labels
/// per frame so no atlas is kept.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    fn layout(&self, font: &fontdue::Font, text: &str, size: f32) -> Layout<()> {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));
        layout
    }

    /// Bounding box of `text` laid out on a single line at `size` px.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32) -> Vec2 {
        let Some(font) = self.fonts.get(id.0) else {
            return Vec2::new(0.0, size);
        };
        let layout = self.layout(font, text, size);
        let w = layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                g.x - m.xmin as f32 + m.advance_width
            })
            .fold(0.0f32, f32::max);
        Vec2::new(w, layout.height())
    }

    /// Renders `text` with its layout box's top-left at `origin`, clipped to `clip`.
    ///
    /// Unknown font ids draw nothing.
    pub fn draw_text(
        &self,
        target: &mut PixelBuffer,
        text: &str,
        id: FontId,
        size: f32,
        color: Rgba,
        origin: Vec2,
        clip: Rect,
    ) {
        let Some(font) = self.fonts.get(id.0) else {
            return;
        };
        let layout = self.layout(font, text, size);
        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, coverage) = font.rasterize_indexed(glyph.key.glyph_index, glyph.key.px);
            target.blend_mask(
                (origin.x + glyph.x).round() as i32,
                (origin.y + glyph.y).round() as i32,
                metrics.width as u32,
                metrics.height as u32,
                &coverage,
                color,
                clip,
            );
        }
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_load() {
        let mut fonts = FontSystem::new();
        let err = fonts.load_font(b"definitely not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
        assert_eq!(fonts.measure_text("x", FontId(0), 10.0), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn unknown_font_draws_nothing() {
        let fonts = FontSystem::new();
        let mut target = PixelBuffer::filled(8, 8, Rgba::BLACK);
        let bounds = target.bounds();
        fonts.draw_text(&mut target, "hi", FontId(3), 12.0, Rgba::WHITE, Vec2::zero(), bounds);
        assert!(target.pixels().iter().all(|p| *p == Rgba::BLACK));
        assert_eq!(fonts.measure_text("hi", FontId(3), 12.0), Vec2::new(0.0, 12.0));
    }
}
