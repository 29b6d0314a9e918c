use tilepaint_engine::raster::Rgba;

/// Root-mean-square blend of `src` onto `dst` at `alpha` (0–255, fractional).
///
/// Each color channel becomes `sqrt(dst² · (1 − a) + src² · a)` with
/// `a = alpha / 255`, rounded. The destination alpha is kept.
pub fn rms_blend(dst: Rgba, src: Rgba, alpha: f32) -> Rgba {
    let a = (alpha / 255.0).clamp(0.0, 1.0);
    let mix = |d: u8, s: u8| {
        let (d, s) = (d as f32, s as f32);
        (d * d * (1.0 - a) + s * s * a).sqrt().round().clamp(0.0, 255.0) as u8
    };
    Rgba::new(mix(dst.r, src.r), mix(dst.g, src.g), mix(dst.b, src.b), dst.a)
}
