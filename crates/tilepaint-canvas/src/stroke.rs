use tilepaint_engine::coords::Vec2;

/// Stamp positions for the motion from `prev` to `cur`.
///
/// Emits `max(1, floor(|cur − prev| / spacing))` points, starting at `cur`
/// and stepping back toward `prev` by `spacing`. Zero-length motion yields
/// exactly `[cur]`. A non-positive `spacing` is treated as 1.
pub fn interpolate(prev: Vec2, cur: Vec2, spacing: f32) -> Vec<Vec2> {
    let spacing = if spacing > 0.0 && spacing.is_finite() { spacing } else { 1.0 };
    let delta = cur - prev;
    let dist = delta.length();
    if dist <= 0.0 || !dist.is_finite() {
        return vec![cur];
    }

    let count = ((dist / spacing).floor() as usize).max(1);
    let step = delta * (spacing / dist);
    (0..count).map(|i| cur - step * i as f32).collect()
}
