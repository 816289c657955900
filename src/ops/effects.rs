// ============================================================================
// GLOW + COMPOSITING
// ============================================================================
//
// The glow source is blurred and its alpha amplified so the ring spills a
// soft halo over its surroundings, then laid over the page with src-over.

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::ops::filters::{blur_visible, sigma_for_radius};

/// Blur `src` so it reaches roughly `radius` pixels, then scale its alpha by
/// `intensity` (saturating). Dimensions are preserved.
pub fn glow(src: &RgbaImage, intensity: f32, radius: u32) -> RgbaImage {
    let mut blurred = blur_visible(src, sigma_for_radius(radius));
    blurred.par_chunks_mut(4).for_each(|px| {
        px[3] = (px[3] as f32 * intensity).round().clamp(0.0, 255.0) as u8;
    });
    blurred
}

/// Porter-Duff source-over of `top` onto `base`.
#[inline]
pub fn blend_over(base: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    // Fast path: fully transparent top pixel — nothing to blend
    if top[3] == 0 {
        return base;
    }
    // Fast path: fully opaque top pixel — just overwrite
    if top[3] == 255 {
        return top;
    }

    let top_a = top[3] as f32 / 255.0;
    let base_a = base[3] as f32 / 255.0;
    let out_a = top_a + base_a * (1.0 - top_a);

    let mut out = [0u8; 4];
    for c in 0..3 {
        let t = top[c] as f32 / 255.0;
        let b = base[c] as f32 / 255.0;
        let v = (t * top_a + b * base_a * (1.0 - top_a)) / out_a;
        out[c] = (v * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba(out)
}

/// Composite `overlay` over `base`. Both must share dimensions.
pub fn compose(base: &RgbaImage, overlay: &RgbaImage) -> RgbaImage {
    debug_assert_eq!(base.dimensions(), overlay.dimensions());
    let mut out = base.clone();
    out.par_chunks_mut(4)
        .zip(overlay.par_chunks(4))
        .for_each(|(dst, top)| {
            let px = blend_over(
                Rgba([dst[0], dst[1], dst[2], dst[3]]),
                Rgba([top[0], top[1], top[2], top[3]]),
            );
            dst.copy_from_slice(&px.0);
        });
    out
}
