use crate::coords::Rect;

use super::Rgba;

/// Row-major RGBA pixel buffer.
///
/// Serves both as the tile being painted and as the per-frame render target.
/// All drawing helpers clip against the buffer bounds and an explicit clip
/// rect, so callers may pass geometry that hangs off any edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Transparent buffer of `width × height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wraps tightly packed RGBA8 bytes. Returns `None` on a length mismatch.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width as usize * height as usize * 4 {
            return None;
        }
        let pixels: &[Rgba] = bytemuck::cast_slice(bytes);
        Some(Self { width, height, pixels: pixels.to_vec() })
    }

    /// Tightly packed RGBA8 bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Whole-buffer rect in pixel units.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Writes one pixel; out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if x < self.width && y < self.height {
            let i = self.index(x, y);
            self.pixels[i] = color;
        }
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Reallocates to a new size. Contents are reset to transparent.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == self.size() {
            return;
        }
        *self = Self::new(width, height);
    }

    /// Fills `rect` (pixel edges snapped outward-exclusive) intersected with `clip`.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba, clip: Rect) {
        let Some((x0, y0, x1, y1)) = self.span(rect, clip) else {
            return;
        };
        for y in y0..y1 {
            let row = self.index(0, y);
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    /// Nearest-neighbour copy of `src` stretched to `dest_w × dest_h` at
    /// (`dest_x`, `dest_y`), restricted to `clip`.
    ///
    /// Destination pixel `px` samples source column `floor(px · src_w / dest_w)`;
    /// the canvas back-maps cursor positions with the same rule.
    pub fn blit_scaled(
        &mut self,
        src: &PixelBuffer,
        dest_x: i64,
        dest_y: i64,
        dest_w: u32,
        dest_h: u32,
        clip: Rect,
    ) {
        if dest_w == 0 || dest_h == 0 || src.width == 0 || src.height == 0 {
            return;
        }
        let dest = Rect::new(dest_x as f32, dest_y as f32, dest_w as f32, dest_h as f32);
        let Some((x0, y0, x1, y1)) = self.span(dest, clip) else {
            return;
        };

        let columns: Vec<usize> = (x0..x1)
            .map(|px| ((px as i64 - dest_x) as u64 * src.width as u64 / dest_w as u64) as usize)
            .collect();

        for py in y0..y1 {
            let sy = ((py as i64 - dest_y) as u64 * src.height as u64 / dest_h as u64) as u32;
            let src_row = src.index(0, sy);
            let dst_row = self.index(x0, py);
            for (i, sx) in columns.iter().enumerate() {
                self.pixels[dst_row + i] = src.pixels[src_row + sx];
            }
        }
    }

    /// Blends an 8-bit coverage mask (glyph bitmap) of `mask_w × mask_h` at
    /// (`x`, `y`) in `color`, restricted to `clip`.
    pub fn blend_mask(
        &mut self,
        x: i32,
        y: i32,
        mask_w: u32,
        mask_h: u32,
        mask: &[u8],
        color: Rgba,
        clip: Rect,
    ) {
        if mask.len() < mask_w as usize * mask_h as usize {
            return;
        }
        let area = Rect::new(x as f32, y as f32, mask_w as f32, mask_h as f32);
        let Some((x0, y0, x1, y1)) = self.span(area, clip) else {
            return;
        };
        for py in y0..y1 {
            let my = (py as i32 - y) as usize;
            for px in x0..x1 {
                let mx = (px as i32 - x) as usize;
                let coverage = mask[my * mask_w as usize + mx] as u32;
                if coverage == 0 {
                    continue;
                }
                let alpha = (coverage * color.a as u32 / 255) as u8;
                let i = self.index(px, py);
                self.pixels[i] = color.over(self.pixels[i], alpha);
            }
        }
    }

    /// Integer pixel span `[x0, x1) × [y0, y1)` of `rect ∩ clip ∩ bounds`.
    fn span(&self, rect: Rect, clip: Rect) -> Option<(u32, u32, u32, u32)> {
        let area = rect.intersect(clip)?.intersect(self.bounds())?;
        let x0 = area.origin.x.floor().max(0.0) as u32;
        let y0 = area.origin.y.floor().max(0.0) as u32;
        let x1 = (area.max().x.ceil() as u32).min(self.width);
        let y1 = (area.max().y.ceil() as u32).min(self.height);
        if x0 >= x1 || y0 >= y1 { None } else { Some((x0, y0, x1, y1)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);

    fn everywhere() -> Rect {
        Rect::new(-10_000.0, -10_000.0, 20_000.0, 20_000.0)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn from_rgba8_rejects_wrong_length() {
        assert!(PixelBuffer::from_rgba8(2, 2, &[0u8; 15]).is_none());
        let buf = PixelBuffer::from_rgba8(1, 2, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(buf.get(0, 1), Some(Rgba::new(5, 6, 7, 8)));
        assert_eq!(buf.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn set_out_of_range_is_ignored() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set(2, 0, RED);
        buf.set(0, 5, RED);
        assert!(buf.pixels().iter().all(|p| *p == Rgba::TRANSPARENT));
        assert_eq!(buf.get(2, 0), None);
    }

    // ── fill_rect ─────────────────────────────────────────────────────────

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_rect(Rect::new(-2.0, 2.0, 4.0, 10.0), RED, everywhere());
        assert_eq!(buf.get(0, 2), Some(RED));
        assert_eq!(buf.get(1, 3), Some(RED));
        assert_eq!(buf.get(2, 2), Some(Rgba::TRANSPARENT));
        assert_eq!(buf.get(0, 1), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn fill_rect_respects_clip() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_rect(buf.bounds(), RED, Rect::new(1.0, 1.0, 1.0, 1.0));
        let painted = buf.pixels().iter().filter(|p| **p == RED).count();
        assert_eq!(painted, 1);
        assert_eq!(buf.get(1, 1), Some(RED));
    }

    // ── blit_scaled ───────────────────────────────────────────────────────

    #[test]
    fn blit_scaled_upsamples_nearest() {
        let mut src = PixelBuffer::new(2, 1);
        src.set(1, 0, RED);
        let mut dst = PixelBuffer::new(4, 2);
        dst.blit_scaled(&src, 0, 0, 4, 2, everywhere());
        assert_eq!(dst.get(1, 1), Some(Rgba::TRANSPARENT));
        assert_eq!(dst.get(2, 0), Some(RED));
        assert_eq!(dst.get(3, 1), Some(RED));
    }

    #[test]
    fn blit_scaled_negative_offset_and_clip() {
        let src = PixelBuffer::filled(3, 3, RED);
        let mut dst = PixelBuffer::new(4, 4);
        dst.blit_scaled(&src, -2, -2, 3, 3, Rect::new(0.0, 0.0, 4.0, 4.0));
        assert_eq!(dst.get(0, 0), Some(RED));
        assert_eq!(dst.get(1, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(dst.get(0, 1), Some(Rgba::TRANSPARENT));
    }

    // ── blend_mask ────────────────────────────────────────────────────────

    #[test]
    fn blend_mask_skips_empty_coverage() {
        let mut dst = PixelBuffer::filled(2, 1, Rgba::BLACK);
        dst.blend_mask(0, 0, 2, 1, &[0, 255], Rgba::WHITE, everywhere());
        assert_eq!(dst.get(0, 0), Some(Rgba::BLACK));
        assert_eq!(dst.get(1, 0), Some(Rgba::WHITE));
    }
}
