use bytemuck::{Pod, Zeroable};

/// Straight-alpha 8-bit RGBA color.
///
/// Layout matches the byte order of `image::RgbaImage`, so buffers can be
/// reinterpreted with `bytemuck` instead of copied channel by channel.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Linear source-over of `self` onto `dst` at `alpha` (0–255).
    ///
    /// Used for UI compositing (glyph coverage, translucent fills). Brush
    /// blending has its own rule in the canvas crate.
    #[inline]
    pub fn over(self, dst: Rgba, alpha: u8) -> Rgba {
        let a = alpha as u32;
        let inv = 255 - a;
        let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
        Rgba::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            (a + (dst.a as u32 * inv + 127) / 255).min(255) as u8,
        )
    }

    /// Packs into the `0x00RRGGBB` layout used by the presentation surface.
    #[inline]
    pub fn to_xrgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_full_alpha_replaces_rgb() {
        let out = Rgba::rgb(10, 20, 30).over(Rgba::rgb(200, 200, 200), 255);
        assert_eq!(out, Rgba::rgb(10, 20, 30));
    }

    #[test]
    fn over_zero_alpha_keeps_destination() {
        let dst = Rgba::new(200, 100, 50, 80);
        assert_eq!(Rgba::WHITE.over(dst, 0), dst);
    }

    #[test]
    fn over_half_alpha_mixes() {
        let out = Rgba::WHITE.over(Rgba::BLACK, 128);
        assert!((127..=129).contains(&out.r));
        assert_eq!(out.a, 255);
    }

    #[test]
    fn xrgb_packing() {
        assert_eq!(Rgba::rgb(0x12, 0x34, 0x56).to_xrgb(), 0x0012_3456);
    }
}
