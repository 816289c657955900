//! Full render: shade the scene, turn the ring into a halo, lay it over the page.

use std::time::Instant;

use image::RgbaImage;

use crate::config::SceneConfig;
use crate::error::Result;
use crate::noise::NoiseTable;
use crate::ops::effects::{compose, glow};
use crate::ops::raster::{self, Rendered};
use crate::log_info;

/// Intermediate buffers, kept for debugging the glow.
pub struct Stages {
    /// Ring pixels only, before blurring.
    pub glow_source: RgbaImage,
    /// Blurred and amplified glow, as composited.
    pub glow: RgbaImage,
    pub image: RgbaImage,
}

pub fn render_stages(config: &SceneConfig, noise: &NoiseTable) -> Result<Stages> {
    let start = Instant::now();
    let Rendered { image, glow: glow_source } = raster::render(config, noise)?;
    log_info!(
        "rasterized {}x{} in {:.0}ms",
        config.width,
        config.height,
        start.elapsed().as_secs_f64() * 1000.0
    );

    let start = Instant::now();
    let halo = glow(&glow_source, config.glow_intensity, config.glow_radius);
    let image = compose(&image, &halo);
    log_info!(
        "glow radius {}px x{} composited in {:.0}ms",
        config.glow_radius,
        config.glow_intensity,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(Stages { glow_source, glow: halo, image })
}

/// Final opaque page.
pub fn render_scene(config: &SceneConfig, noise: &NoiseTable) -> Result<RgbaImage> {
    Ok(render_stages(config, noise)?.image)
}
