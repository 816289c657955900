//! Packed 32-bit colours (`0xAARRGGBB`) and conversion to `image` pixels.

use image::Rgba;

/// Opaque white, before shading.
pub const WHITE: u32 = 0xFFFFFF;
/// Base colour of the glowing ring.
pub const RING_RED: u32 = 0xA02020;

/// Opaque alpha channel in packed position.
const OPAQUE: u32 = 0xFF << 24;

#[inline]
pub fn pack_rgb(red: u32, green: u32, blue: u32) -> u32 {
    OPAQUE | (red.min(255) << 16) | (green.min(255) << 8) | blue.min(255)
}

#[inline]
pub fn channels(color: u32) -> [u8; 4] {
    [
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
        ((color >> 24) & 0xFF) as u8,
    ]
}

#[inline]
pub fn to_rgba(color: u32) -> Rgba<u8> {
    Rgba(channels(color))
}

/// Scale the RGB channels of `color` by `m`, rounding half up. The result is
/// always opaque; channels saturate at 255 if `m` exceeds 1.
#[inline]
pub fn multiply_color(color: u32, m: f64) -> u32 {
    let scale = |shift: u32| -> u32 {
        let c = ((color >> shift) & 0xFF) as f64;
        (c * m + 0.5).max(0.0) as u32
    };
    pack_rgb(scale(16), scale(8), scale(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_light_is_identity() {
        for c in [WHITE, RING_RED, 0x123456, 0x000000] {
            assert_eq!(multiply_color(c, 1.0), 0xFF00_0000 | c);
        }
    }

    #[test]
    fn rounds_half_up() {
        // 0xA0 * 0.5 = 80.0, 0x20 * 0.5 = 16.0, 0x21 * 0.5 = 16.5 -> 17
        assert_eq!(multiply_color(0xA02021, 0.5), 0xFF50_1011);
    }

    #[test]
    fn saturates_above_full_light() {
        assert_eq!(multiply_color(WHITE, 1.5), 0xFFFF_FFFF);
    }

    #[test]
    fn channels_are_rgba_ordered() {
        assert_eq!(to_rgba(0x80A02020), Rgba([0xA0, 0x20, 0x20, 0x80]));
    }
}
