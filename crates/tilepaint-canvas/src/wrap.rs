/// Reduces `v` into `0..dim` with wraparound. `dim` must be non-zero.
#[inline]
pub fn wrap(v: i64, dim: u32) -> u32 {
    v.rem_euclid(dim as i64) as u32
}

/// Wraps a point onto a `width × height` torus.
#[inline]
pub fn wrap_point(x: i64, y: i64, (width, height): (u32, u32)) -> (u32, u32) {
    (wrap(x, width), wrap(y, height))
}
