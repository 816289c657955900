// ============================================================================
// SCENE RASTERIZER — zone classification + row-parallel shading pass
// ============================================================================
//
// Every pixel depends only on its coordinates, the scene config and the
// noise table, so rows are shaded independently on the rayon pool. Ring
// pixels are written to both the main image and the glow source.

use image::RgbaImage;
use rayon::prelude::*;

use crate::color::{RING_RED, WHITE, channels};
use crate::config::SceneConfig;
use crate::error::{RenderError, Result};
use crate::io::{blank_opaque, blank_transparent};
use crate::noise::NoiseTable;
use crate::ops::shader::shade;

/// Ridge normal used for the background grain and the exact centre pixel.
pub const VERTICAL_RIDGE: (f64, f64) = (0.0, 1.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    /// Button face, `r <= button_radius`.
    Inner,
    /// Glowing ring, `button_radius < r <= light_radius`.
    Ring,
    /// Page outside the light radius.
    Background,
}

/// Everything the shader needs for one pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelContext {
    pub x: u32,
    pub y: u32,
    pub cx: i64,
    pub cy: i64,
    pub r: f64,
    /// Unit ridge normal.
    pub ridge: (f64, f64),
    pub zone: Zone,
    /// Noise table index: integer radius on the disk, row on the background.
    pub line: usize,
    pub base: u32,
}

impl PixelContext {
    pub fn adds_glow(&self) -> bool {
        self.zone == Zone::Ring
    }
}

/// Classify pixel `(x, y)` of the scene.
pub fn classify_pixel(config: &SceneConfig, x: u32, y: u32) -> PixelContext {
    let cx = x as i64 - config.button_x;
    let cy = y as i64 - config.button_y;
    let r = ((cx * cx + cy * cy) as f64).sqrt();

    let (ridge, zone, line, base) = if r <= config.light_radius as f64 {
        let ridge = if r > 0.0 {
            (cx as f64 / r, cy as f64 / r)
        } else {
            VERTICAL_RIDGE
        };
        if r <= config.button_radius as f64 {
            (ridge, Zone::Inner, r as usize, WHITE)
        } else {
            (ridge, Zone::Ring, r as usize, RING_RED)
        }
    } else {
        (VERTICAL_RIDGE, Zone::Background, y as usize, WHITE)
    };

    PixelContext { x, y, cx, cy, r, ridge, zone, line, base }
}

/// Classify and shade a single pixel.
pub fn shade_pixel(config: &SceneConfig, noise: &NoiseTable, x: u32, y: u32) -> (PixelContext, u32) {
    let ctx = classify_pixel(config, x, y);
    let (dx, dy) = ctx.ridge;
    let color = shade(dx, dy, config.light_dir, noise.sample(ctx.line), ctx.base);
    (ctx, color)
}

/// The shaded page and the transparent glow source holding only ring pixels.
pub struct Rendered {
    pub image: RgbaImage,
    pub glow: RgbaImage,
}

/// Shade every pixel of the scene.
pub fn render(config: &SceneConfig, noise: &NoiseTable) -> Result<Rendered> {
    config.validate()?;
    let required = config.required_noise_size();
    if noise.len() < required {
        return Err(RenderError::Config(format!(
            "noise table has {} samples, scene needs at least {}",
            noise.len(),
            required
        )));
    }

    let w = config.width as usize;
    let stride = w * 4;
    let mut image = blank_opaque(config.width, config.height);
    let mut glow = blank_transparent(config.width, config.height);

    image
        .par_chunks_mut(stride)
        .zip(glow.par_chunks_mut(stride))
        .enumerate()
        .for_each(|(y, (row_img, row_glow))| {
            for x in 0..w {
                let (ctx, color) = shade_pixel(config, noise, x as u32, y as u32);
                let px = channels(color);
                let pi = x * 4;
                row_img[pi..pi + 4].copy_from_slice(&px);
                if ctx.adds_glow() {
                    row_glow[pi..pi + 4].copy_from_slice(&px);
                }
            }
        });

    Ok(Rendered { image, glow })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::shader::light_factor;

    fn scene() -> SceneConfig {
        SceneConfig::new(1100, 1400)
    }

    #[test]
    fn centre_pixel_is_inner_with_fallback_ridge() {
        let c = classify_pixel(&scene(), 550, 700);
        assert_eq!(c.zone, Zone::Inner);
        assert_eq!(c.ridge, VERTICAL_RIDGE);
        assert_eq!(c.line, 0);
        assert_eq!(c.base, WHITE);
        let l = light_factor(c.ridge.0, c.ridge.1, scene().light_dir, 0.5);
        assert!((0.63..=1.0).contains(&l));
    }

    #[test]
    fn zero_radius_button_never_yields_nan() {
        let config = SceneConfig::new(64, 64).with_radii(0, 0);
        let c = classify_pixel(&config, 32, 32);
        assert_eq!(c.zone, Zone::Inner);
        assert!(!c.ridge.0.is_nan() && !c.ridge.1.is_nan());
    }

    #[test]
    fn ring_pixel_between_radii() {
        let c = classify_pixel(&scene(), 960, 700);
        assert_eq!(c.r, 410.0);
        assert_eq!(c.zone, Zone::Ring);
        assert_eq!(c.base, RING_RED);
        assert_eq!(c.line, 410);
        assert_eq!(c.ridge, (1.0, 0.0));
    }

    #[test]
    fn background_pixel_uses_row_noise() {
        let c = classify_pixel(&scene(), 550, 0);
        assert_eq!(c.r, 700.0);
        assert_eq!(c.zone, Zone::Background);
        assert_eq!(c.ridge, (0.0, 1.0));
        assert_eq!(c.line, 0);
        assert_eq!(c.base, WHITE);
    }

    #[test]
    fn zone_boundaries_are_inclusive_on_the_inside() {
        let s = scene();
        assert_eq!(classify_pixel(&s, 550 + 385, 700).zone, Zone::Inner);
        assert_eq!(classify_pixel(&s, 550 + 386, 700).zone, Zone::Ring);
        assert_eq!(classify_pixel(&s, 550 + 440, 700).zone, Zone::Ring);
        let outside = classify_pixel(&s, 550 + 441, 700);
        assert_eq!(outside.zone, Zone::Background);
        assert_eq!(outside.ridge, VERTICAL_RIDGE);
        assert_eq!(outside.line, 700);
    }

    #[test]
    fn disk_ridges_are_unit_length() {
        let s = scene();
        for (x, y) in [(551, 700), (600, 650), (300, 1000), (900, 800), (700, 1050)] {
            let c = classify_pixel(&s, x, y);
            assert_ne!(c.zone, Zone::Background);
            let len = (c.ridge.0 * c.ridge.0 + c.ridge.1 * c.ridge.1).sqrt();
            assert!((len - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn glow_holds_only_ring_pixels() {
        let config = SceneConfig::new(120, 90);
        let noise = NoiseTable::seeded(config.noise_size, 1);
        let out = render(&config, &noise).unwrap();
        for (x, y, px) in out.glow.enumerate_pixels() {
            let ctx = classify_pixel(&config, x, y);
            if ctx.zone == Zone::Ring {
                assert_eq!(px[3], 255);
                assert_eq!(px, out.image.get_pixel(x, y));
            } else {
                assert_eq!(px.0, [0, 0, 0, 0], "glow written at ({x}, {y})");
            }
        }
        assert!(out.image.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn parallel_pass_matches_per_pixel_shading() {
        let config = SceneConfig::new(80, 60);
        let noise = NoiseTable::seeded(config.noise_size, 9);
        let out = render(&config, &noise).unwrap();
        for (x, y, px) in out.image.enumerate_pixels() {
            let (_, color) = shade_pixel(&config, &noise, x, y);
            assert_eq!(px.0, channels(color));
        }
    }

    #[test]
    fn short_noise_table_is_rejected() {
        let config = SceneConfig::new(100, 200);
        let noise = NoiseTable::seeded(199, 0);
        assert!(matches!(render(&config, &noise), Err(RenderError::Config(_))));
    }
}
