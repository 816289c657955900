// ============================================================================
// BRUSHED-METAL SHADER
// ============================================================================
//
// Reflected light depends on the angle between the local ridge normal and
// the light, not its sign. With these constants the light factor always
// lands in [GRAIN_FLOOR * AMBIENT, 1.0]; re-derive that bound before
// changing any of them.

use crate::color::multiply_color;

/// Light fraction present regardless of ridge orientation.
pub const AMBIENT: f64 = 0.7;
/// Specular concentration; higher values give a narrower highlight.
pub const SPECULAR_EXPONENT: i32 = 10;
/// Grain multiplier range is [GRAIN_FLOOR, 1.0).
pub const GRAIN_FLOOR: f64 = 0.9;

/// Smallest light factor the shader can produce.
pub const MIN_LIGHT: f64 = GRAIN_FLOOR * AMBIENT;

/// Light factor for ridge normal `(dx, dy)` under light `light_dir`, with
/// grain sample `variance` in [0, 1).
#[inline]
pub fn light_factor(dx: f64, dy: f64, light_dir: (f64, f64), variance: f64) -> f64 {
    let facing = (dx * light_dir.0 + dy * light_dir.1).abs();
    let light = AMBIENT + facing.powi(SPECULAR_EXPONENT) * (1.0 - AMBIENT);
    light * (GRAIN_FLOOR + (1.0 - GRAIN_FLOOR) * variance)
}

/// Final opaque packed colour for a pixel.
#[inline]
pub fn shade(dx: f64, dy: f64, light_dir: (f64, f64), variance: f64, base: u32) -> u32 {
    multiply_color(base, light_factor(dx, dy, light_dir, variance))
}
