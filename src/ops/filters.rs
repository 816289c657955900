// ============================================================================
// GAUSSIAN BLUR — separable, rayon-parallel, premultiplied alpha
// ============================================================================

use image::{RgbaImage, imageops};
use rayon::prelude::*;

/// Sigma for a blur that reaches `radius` pixels (kernel spans 3 sigma).
pub fn sigma_for_radius(radius: u32) -> f32 {
    radius as f32 / 3.0
}

/// Build a 1-D Gaussian kernel truncated at ceil(3*sigma).
fn build_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    if radius == 0 {
        return vec![1.0];
    }
    let len = radius * 2 + 1;
    let mut kernel = vec![0.0f32; len];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;
    for i in 0..len {
        let x = i as f32 - radius as f32;
        let v = (-x * x / s2).exp();
        kernel[i] = v;
        sum += v;
    }
    let inv = 1.0 / sum;
    for v in &mut kernel { *v *= inv; }
    kernel
}

/// Bounding box `(x, y, w, h)` of pixels with non-zero alpha.
pub fn opaque_bounds(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut min_x = img.width();
    let mut min_y = img.height();
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    for (x, y, p) in img.enumerate_pixels() {
        if p[3] > 0 {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if min_x > max_x || min_y > max_y {
        return None;
    }
    Some((min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Blur `src`, spending work only on the bounding box of its visible pixels
/// padded by the kernel reach. Everything outside stays fully transparent.
pub fn blur_visible(src: &RgbaImage, sigma: f32) -> RgbaImage {
    let Some((bx, by, bw, bh)) = opaque_bounds(src) else {
        return src.clone();
    };

    // Expand bbox by ceil(3*sigma) so the kernel can spread into it.
    let pad = (sigma * 3.0).ceil() as u32;
    let crop_x = bx.saturating_sub(pad);
    let crop_y = by.saturating_sub(pad);
    let crop_x2 = (bx + bw + pad).min(src.width());
    let crop_y2 = (by + bh + pad).min(src.height());

    let sub = imageops::crop_imm(src, crop_x, crop_y, crop_x2 - crop_x, crop_y2 - crop_y).to_image();
    let blurred = parallel_gaussian_blur(&sub, sigma);

    let mut out = RgbaImage::new(src.width(), src.height());
    imageops::replace(&mut out, &blurred, crop_x as i64, crop_y as i64);
    out
}

/// Separable Gaussian blur with edge clamping. Colour is premultiplied by
/// alpha while blurring so transparent neighbours do not darken edges.
pub fn parallel_gaussian_blur(src: &RgbaImage, sigma: f32) -> RgbaImage {
    let w = src.width() as usize;
    let h = src.height() as usize;
    if w == 0 || h == 0 { return src.clone(); }

    let kernel = build_gaussian_kernel(sigma);
    let radius = kernel.len() / 2;

    // Premultiplied f32 buffer (4 channels interleaved).
    let mut buf_in: Vec<f32> = Vec::with_capacity(w * h * 4);
    for p in src.as_raw().chunks_exact(4) {
        let a = p[3] as f32 / 255.0;
        buf_in.extend_from_slice(&[p[0] as f32 * a, p[1] as f32 * a, p[2] as f32 * a, p[3] as f32]);
    }

    // --- Horizontal pass (parallel by row) ---
    let mut buf_h = vec![0.0f32; w * h * 4];
    buf_h.par_chunks_mut(w * 4).enumerate().for_each(|(y, row_out)| {
        let row_in = &buf_in[y * w * 4..(y + 1) * w * 4];
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = (x as isize + ki as isize - radius as isize).clamp(0, w as isize - 1) as usize;
                for c in 0..4 {
                    acc[c] += row_in[sx * 4 + c] * kv;
                }
            }
            row_out[x * 4..x * 4 + 4].copy_from_slice(&acc);
        }
    });

    // --- Vertical pass, un-premultiplying into the output ---
    let mut dst_raw = vec![0u8; w * h * 4];
    dst_raw.par_chunks_mut(w * 4).enumerate().for_each(|(y, row_out)| {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = (y as isize + ki as isize - radius as isize).clamp(0, h as isize - 1) as usize;
                let idx = sy * w * 4 + x * 4;
                for c in 0..4 {
                    acc[c] += buf_h[idx + c] * kv;
                }
            }
            let a = acc[3].round().clamp(0.0, 255.0);
            let out = &mut row_out[x * 4..x * 4 + 4];
            if a > 0.0 {
                let inv = 255.0 / acc[3];
                for c in 0..3 {
                    out[c] = (acc[c] * inv).round().clamp(0.0, 255.0) as u8;
                }
            }
            out[3] = a as u8;
        }
    });

    let mut out = RgbaImage::new(w as u32, h as u32);
    out.copy_from_slice(&dst_raw);
    out
}
