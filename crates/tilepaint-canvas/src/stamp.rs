use tilepaint_engine::raster::PixelBuffer;

use crate::blend::rms_blend;
use crate::brush::{Brush, BrushShape};
use crate::wrap::wrap_point;

/// Stamps `brush` once at buffer pixel `center`, wrapping every touched
/// coordinate around the buffer edges.
///
/// Round shapes cover every offset within Euclidean distance `radius` of the
/// center. An empty buffer is left untouched.
pub fn stamp(target: &mut PixelBuffer, center: (i64, i64), brush: &Brush) {
    let dims = target.size();
    if dims.0 == 0 || dims.1 == 0 {
        return;
    }

    if brush.shape == BrushShape::Point {
        let (x, y) = wrap_point(center.0, center.1, dims);
        target.set(x, y, brush.color);
        return;
    }

    let r = brush.radius() as i64;
    let rf = r as f32;
    for dy in -r..=r {
        for dx in -r..=r {
            let d = ((dx * dx + dy * dy) as f32).sqrt();
            if d > rf {
                continue;
            }
            let (x, y) = wrap_point(center.0 + dx, center.1 + dy, dims);
            match brush.shape {
                BrushShape::HardRound => target.set(x, y, brush.color),
                BrushShape::SoftRound => {
                    let Some(dst) = target.get(x, y) else { continue };
                    let alpha = brush.color.a as f32 * (1.0 - d / rf);
                    target.set(x, y, rms_blend(dst, brush.color, alpha));
                }
                BrushShape::Point => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepaint_engine::raster::Rgba;

    const MAGENTA: Rgba = Rgba::rgb(255, 0, 255);

    fn changed(before: &PixelBuffer, after: &PixelBuffer) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..before.height() {
            for x in 0..before.width() {
                if before.get(x, y) != after.get(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    // ── point ─────────────────────────────────────────────────────────────

    #[test]
    fn point_at_corner_changes_one_pixel() {
        let before = PixelBuffer::filled(16, 16, Rgba::BLACK);
        let mut after = before.clone();
        stamp(&mut after, (15, 15), &Brush::new(BrushShape::Point, MAGENTA, 5));
        assert_eq!(changed(&before, &after), vec![(15, 15)]);
        assert_eq!(after.get(15, 15), Some(MAGENTA));
    }

    #[test]
    fn point_is_idempotent() {
        let brush = Brush::new(BrushShape::Point, MAGENTA, 3);
        let mut once = PixelBuffer::filled(8, 8, Rgba::WHITE);
        stamp(&mut once, (-3, 12), &brush);
        let mut twice = once.clone();
        stamp(&mut twice, (-3, 12), &brush);
        assert_eq!(once, twice);
        assert_eq!(once.get(5, 4), Some(MAGENTA));
    }

    // ── hard round ────────────────────────────────────────────────────────

    #[test]
    fn hard_round_wraps_across_both_edges() {
        let before = PixelBuffer::filled(10, 10, Rgba::BLACK);
        let mut after = before.clone();
        stamp(&mut after, (0, 0), &Brush::new(BrushShape::HardRound, MAGENTA, 2));

        let touched = changed(&before, &after);
        assert_eq!(touched.len(), 13);
        assert!(touched.contains(&(8, 0)));
        assert!(touched.contains(&(9, 9)));
        assert!(touched.contains(&(0, 2)));
        assert!(!touched.contains(&(8, 8)));
        assert!(touched.iter().all(|&(x, y)| after.get(x, y) == Some(MAGENTA)));
    }

    #[test]
    fn radius_one_is_a_plus() {
        let mut buf = PixelBuffer::new(5, 5);
        stamp(&mut buf, (2, 2), &Brush::new(BrushShape::HardRound, MAGENTA, 1));
        let painted: Vec<_> = (0..5)
            .flat_map(|y| (0..5).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.get(x, y) == Some(MAGENTA))
            .collect();
        assert_eq!(painted, vec![(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)]);
    }

    // ── soft round ────────────────────────────────────────────────────────

    #[test]
    fn soft_round_fades_to_edge() {
        let mut buf = PixelBuffer::filled(9, 9, Rgba::BLACK);
        stamp(&mut buf, (4, 4), &Brush::new(BrushShape::SoftRound, Rgba::WHITE, 4));

        let center = buf.get(4, 4).unwrap();
        assert!(center.r >= 254);
        // Distance 4 means zero effective alpha.
        assert_eq!(buf.get(8, 4), Some(Rgba::BLACK));
        let mid = buf.get(6, 4).unwrap();
        assert!(mid.r > 0 && mid.r < center.r);
        assert_eq!(buf.get(0, 0), Some(Rgba::BLACK));
    }

    #[test]
    fn soft_round_keeps_destination_alpha() {
        let mut buf = PixelBuffer::filled(4, 4, Rgba::new(0, 0, 0, 40));
        stamp(&mut buf, (1, 1), &Brush::new(BrushShape::SoftRound, MAGENTA, 2));
        assert!(buf.pixels().iter().all(|p| p.a == 40));
    }

    #[test]
    fn empty_buffer_is_untouched() {
        let mut buf = PixelBuffer::new(0, 0);
        stamp(&mut buf, (3, 3), &Brush::new(BrushShape::HardRound, MAGENTA, 2));
        assert!(buf.pixels().is_empty());
    }
}
