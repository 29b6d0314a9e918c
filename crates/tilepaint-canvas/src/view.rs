use tilepaint_engine::coords::{Rect, Vec2};
use tilepaint_engine::raster::PixelBuffer;

use crate::wrap::wrap_point;

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 20.0;
/// Zoom increment: relative per wheel notch, absolute per zoom button press.
pub const ZOOM_STEP: f32 = 0.1;

/// Clamps to the zoom range and rounds to two decimals.
fn settle_zoom(zoom: f32) -> f32 {
    let z = zoom.max(MIN_ZOOM).min(MAX_ZOOM);
    ((z * 100.0).round() / 100.0).max(MIN_ZOOM).min(MAX_ZOOM)
}

/// Normalizes one scroll axis into `(-scaled, 0]`.
fn normalize_axis(v: f32, scaled: u32) -> f32 {
    let s = scaled as f32;
    let r = v.rem_euclid(s);
    if r > 0.0 { r - s } else { 0.0 }
}

/// Zoom and scroll of the infinitely tiled view onto one buffer.
///
/// Coordinates called `local` are relative to the top-left of the view region.
/// Scroll is the region-local position of a tile's top-left corner and is kept
/// in `(-scaled, 0]` on both axes whenever buffer dimensions are known.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TileView {
    zoom: f32,
    scroll: Vec2,
}

impl Default for TileView {
    fn default() -> Self {
        Self { zoom: 1.0, scroll: Vec2::zero() }
    }
}

impl TileView {
    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[inline]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Status-line caption, e.g. `Zoom: 150%`.
    pub fn zoom_text(&self) -> String {
        format!("Zoom: {}%", (self.zoom * 100.0).round() as i32)
    }

    /// On-screen size of one tile: `floor(dim × zoom)`, at least 1.
    pub fn scaled_size(&self, (w, h): (u32, u32)) -> (u32, u32) {
        let scale = |d: u32| ((d as f32 * self.zoom).floor() as u32).max(1);
        (scale(w), scale(h))
    }

    /// Unwrapped buffer-space position under `local`.
    pub fn buffer_point(&self, local: Vec2, dims: (u32, u32)) -> Vec2 {
        let (sw, sh) = self.scaled_size(dims);
        Vec2::new(
            (local.x - self.scroll.x) * dims.0 as f32 / sw as f32,
            (local.y - self.scroll.y) * dims.1 as f32 / sh as f32,
        )
    }

    /// Buffer pixel drawn at `local`, using the same integer mapping as
    /// [`composite`](Self::composite).
    pub fn pixel_at(&self, local: Vec2, dims: (u32, u32)) -> (u32, u32) {
        let (sw, sh) = self.scaled_size(dims);
        let origin = self.scroll.floor();
        let back = |l: f32, o: f32, dim: u32, scaled: u32| {
            let offset = l.floor() as i64 - o as i64;
            (offset * dim as i64).div_euclid(scaled as i64)
        };
        wrap_point(
            back(local.x, origin.x, dims.0, sw),
            back(local.y, origin.y, dims.1, sh),
            dims,
        )
    }

    /// Brings scroll back into `(-scaled, 0]` for buffers of `dims`.
    pub fn normalize(&mut self, dims: (u32, u32)) {
        let (sw, sh) = self.scaled_size(dims);
        self.scroll = Vec2::new(normalize_axis(self.scroll.x, sw), normalize_axis(self.scroll.y, sh));
    }

    /// Sets zoom (clamped and rounded) keeping the buffer point under
    /// `anchor` fixed. Without `dims` only the zoom changes.
    fn set_zoom_anchored(&mut self, zoom: f32, anchor: Vec2, dims: Option<(u32, u32)>) {
        let Some(dims) = dims else {
            self.zoom = settle_zoom(zoom);
            return;
        };
        let point = self.buffer_point(anchor, dims);
        self.zoom = settle_zoom(zoom);
        let (sw, sh) = self.scaled_size(dims);
        self.scroll = Vec2::new(
            anchor.x - point.x * sw as f32 / dims.0 as f32,
            anchor.y - point.y * sh as f32 / dims.1 as f32,
        );
        self.normalize(dims);
    }

    /// Wheel zoom: `zoom += direction × 0.1 × zoom`, anchored at `cursor`.
    pub fn zoom_at(&mut self, cursor: Vec2, direction: f32, dims: Option<(u32, u32)>) {
        self.set_zoom_anchored(self.zoom + direction * ZOOM_STEP * self.zoom, cursor, dims);
    }

    /// Button zoom: `zoom += direction × 0.1`, anchored at `center`.
    pub fn step_zoom(&mut self, direction: f32, center: Vec2, dims: Option<(u32, u32)>) {
        self.set_zoom_anchored(self.zoom + direction * ZOOM_STEP, center, dims);
    }

    /// Moves the tiles by a screen-space `delta`.
    pub fn pan(&mut self, delta: Vec2, dims: Option<(u32, u32)>) {
        self.scroll += delta;
        if let Some(dims) = dims {
            self.normalize(dims);
        }
    }

    /// Tile columns and rows needed to cover a region of `size`.
    ///
    /// `ceil(region / dim / zoom) + 2` per axis, widened when flooring the
    /// scaled tile size would otherwise leave the far edge uncovered.
    pub fn tile_grid(&self, size: Vec2, dims: (u32, u32)) -> (u32, u32) {
        let (sw, sh) = self.scaled_size(dims);
        let count = |region: f32, dim: u32, scaled: u32| {
            let nominal = (region / dim as f32 / self.zoom).ceil().max(0.0) as u32 + 2;
            let covering = (region / scaled as f32).ceil().max(0.0) as u32 + 2;
            nominal.max(covering)
        };
        (count(size.x, dims.0, sw), count(size.y, dims.1, sh))
    }

    /// Draws `src` tiled across `region` of `target`, clipped to `region`.
    pub fn composite(&self, src: &PixelBuffer, target: &mut PixelBuffer, region: Rect) {
        let dims = src.size();
        if dims.0 == 0 || dims.1 == 0 || region.is_empty() {
            return;
        }
        let (sw, sh) = self.scaled_size(dims);
        let (cols, rows) = self.tile_grid(region.size, dims);
        let origin = self.scroll.floor();
        let base_x = region.x().floor() as i64 + origin.x as i64;
        let base_y = region.y().floor() as i64 + origin.y as i64;

        for row in 0..rows as i64 {
            for col in 0..cols as i64 {
                target.blit_scaled(
                    src,
                    base_x + col * sw as i64,
                    base_y + row * sh as i64,
                    sw,
                    sh,
                    region,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepaint_engine::raster::Rgba;

    fn checker(w: u32, h: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                buf.set(x, y, Rgba::rgb((x * 16) as u8, (y * 16) as u8, 7));
            }
        }
        buf
    }

    fn wrapped_eq(a: Vec2, b: Vec2, (w, h): (u32, u32)) -> bool {
        let close = |p: f32, q: f32, d: u32| {
            let diff = (p - q).rem_euclid(d as f32);
            diff < 1e-3 || (d as f32 - diff) < 1e-3
        };
        close(a.x, b.x, w) && close(a.y, b.y, h)
    }

    // ── zoom ──────────────────────────────────────────────────────────────

    #[test]
    fn six_wheel_ups_from_one() {
        let mut view = TileView::default();
        for _ in 0..6 {
            view.zoom_at(Vec2::zero(), 1.0, Some((16, 16)));
        }
        assert!((view.zoom() - 1.77).abs() < 1e-4, "zoom = {}", view.zoom());
        assert_eq!(view.zoom_text(), "Zoom: 177%");
    }

    #[test]
    fn zoom_stays_in_range() {
        let mut view = TileView::default();
        for _ in 0..200 {
            view.zoom_at(Vec2::new(3.0, 3.0), 3.0, Some((5, 7)));
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&view.zoom()));
        }
        assert_eq!(view.zoom(), MAX_ZOOM);
        for _ in 0..200 {
            view.zoom_at(Vec2::new(3.0, 3.0), -4.0, None);
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&view.zoom()));
        }
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn wheel_zoom_keeps_point_under_cursor() {
        let dims = (16, 12);
        let cursor = Vec2::new(37.0, 21.0);
        let mut view = TileView::default();
        view.pan(Vec2::new(-5.0, -3.0), Some(dims));
        for dir in [1.0, 1.0, 1.0, -1.0, 2.0, -1.0] {
            let before = view.buffer_point(cursor, dims);
            view.zoom_at(cursor, dir, Some(dims));
            let after = view.buffer_point(cursor, dims);
            assert!(wrapped_eq(before, after, dims), "{before:?} vs {after:?}");
        }
    }

    #[test]
    fn button_zoom_is_additive_and_centered() {
        let dims = (20, 20);
        let center = Vec2::new(50.0, 40.0);
        let mut view = TileView::default();
        let before = view.buffer_point(center, dims);
        view.step_zoom(1.0, center, Some(dims));
        view.step_zoom(1.0, center, Some(dims));
        assert!((view.zoom() - 1.2).abs() < 1e-4);
        assert!(wrapped_eq(before, view.buffer_point(center, dims), dims));

        let mut low = TileView::default();
        for _ in 0..20 {
            low.step_zoom(-1.0, center, None);
        }
        assert_eq!(low.zoom(), MIN_ZOOM);
    }

    // ── scroll ────────────────────────────────────────────────────────────

    #[test]
    fn scroll_normalizes_into_half_open_range() {
        let dims = (10, 8);
        let mut view = TileView::default();
        for delta in [Vec2::new(3.0, 3.0), Vec2::new(-27.5, 100.0), Vec2::new(10.0, -8.0)] {
            view.pan(delta, Some(dims));
            let s = view.scroll();
            assert!(s.x > -10.0 && s.x <= 0.0, "{s:?}");
            assert!(s.y > -8.0 && s.y <= 0.0, "{s:?}");
        }
        assert_eq!(normalize_axis(0.0, 10), 0.0);
        assert_eq!(normalize_axis(-10.0, 10), 0.0);
        assert_eq!(normalize_axis(5.0, 10), -5.0);
    }

    #[test]
    fn pan_without_image_is_raw() {
        let mut view = TileView::default();
        view.pan(Vec2::new(25.0, -3.0), None);
        assert_eq!(view.scroll(), Vec2::new(25.0, -3.0));
        view.normalize((10, 10));
        assert_eq!(view.scroll(), Vec2::new(-5.0, -3.0));
    }

    // ── tiling ────────────────────────────────────────────────────────────

    #[test]
    fn tile_grid_matches_nominal_formula() {
        let view = TileView::default();
        assert_eq!(view.tile_grid(Vec2::new(640.0, 345.0), (64, 64)), (12, 8));
    }

    #[test]
    fn scaled_size_floors_with_minimum() {
        let mut view = TileView::default();
        view.zoom_at(Vec2::zero(), 5.0, None);
        assert_eq!(view.zoom(), 1.5);
        assert_eq!(view.scaled_size((3, 5)), (4, 7));
        let mut tiny = TileView::default();
        for _ in 0..40 {
            tiny.zoom_at(Vec2::zero(), -1.0, None);
        }
        assert_eq!(tiny.scaled_size((3, 3)), (1, 1));
    }

    #[test]
    fn composite_covers_region_and_matches_back_map() {
        let src = checker(3, 5);
        let dims = src.size();
        let mut view = TileView::default();
        view.zoom_at(Vec2::zero(), 5.0, Some(dims));
        view.pan(Vec2::new(-2.6, 1.3), Some(dims));

        let region = Rect::new(4.0, 2.0, 41.0, 23.0);
        let mut target = PixelBuffer::filled(50, 30, Rgba::TRANSPARENT);
        view.composite(&src, &mut target, region);

        for py in 2..25u32 {
            for px in 4..45u32 {
                let local = Vec2::new(px as f32 - 4.0, py as f32 - 2.0);
                let (bx, by) = view.pixel_at(local, dims);
                assert_eq!(target.get(px, py), src.get(bx, by), "at ({px}, {py})");
            }
        }
        assert_eq!(target.get(3, 10), Some(Rgba::TRANSPARENT));
        assert_eq!(target.get(45, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn pixel_at_never_out_of_bounds() {
        let dims = (7, 3);
        let mut view = TileView::default();
        view.zoom_at(Vec2::new(1.0, 1.0), 7.0, Some(dims));
        view.pan(Vec2::new(-1234.5, 987.25), Some(dims));
        for y in (-50..50).map(|v| v as f32 * 3.7) {
            for x in (-50..50).map(|v| v as f32 * 2.3) {
                let (bx, by) = view.pixel_at(Vec2::new(x, y), dims);
                assert!(bx < 7 && by < 3);
            }
        }
    }
}
