// ============================================================================
// SCENE CONFIGURATION — fixed geometry for one render
// ============================================================================
//
// The reference scene is an 11x14 inch print at 300 DPI with the button
// centred on the page. Every value here is read-only once a render starts.

use crate::error::{RenderError, Result};

/// Print resolution of the reference scene.
pub const DPI: u32 = 300;
/// Page size of the reference scene, in inches.
pub const PAGE_WIDTH_IN: u32 = 11;
pub const PAGE_HEIGHT_IN: u32 = 14;
/// Number of samples in the radial noise table.
pub const NOISE_TABLE_SIZE: usize = 10 * 1024;
/// Alpha gain applied to the blurred glow.
pub const GLOW_INTENSITY: f32 = 5.0;

/// Immutable geometry and post-processing constants for a render.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub button_x: i64,
    pub button_y: i64,
    pub button_radius: u32,
    /// Outer edge of the glowing ring; pixels past this are background.
    pub light_radius: u32,
    /// Unit vector pointing at the light source.
    pub light_dir: (f64, f64),
    pub noise_size: usize,
    pub glow_intensity: f32,
    /// Blur extent of the glow, in pixels.
    pub glow_radius: u32,
}

impl SceneConfig {
    /// The 3300x4200 reference scene.
    pub fn reference() -> Self {
        Self::new(PAGE_WIDTH_IN * DPI, PAGE_HEIGHT_IN * DPI)
    }

    /// Centred scene of the given size, with radii and glow scaled from the
    /// width the same way as the reference scene.
    pub fn new(width: u32, height: u32) -> Self {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        Self {
            width,
            height,
            dpi: DPI,
            button_x: (width / 2) as i64,
            button_y: (height / 2) as i64,
            button_radius: width * 35 / 100,
            light_radius: width * 40 / 100,
            light_dir: (-s, s),
            noise_size: NOISE_TABLE_SIZE,
            glow_intensity: GLOW_INTENSITY,
            glow_radius: width * 3 / 100,
        }
    }

    /// Override the two radii, keeping everything else.
    pub fn with_radii(mut self, button_radius: u32, light_radius: u32) -> Self {
        self.button_radius = button_radius;
        self.light_radius = light_radius;
        self
    }

    /// Smallest noise table that every pixel's lookup index fits in.
    ///
    /// Disk pixels index by `floor(r)` with `r <= light_radius`, background
    /// pixels index by row.
    pub fn required_noise_size(&self) -> usize {
        (self.height as usize).max(self.light_radius as usize + 1)
    }

    /// Check every invariant the rasterizer relies on.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.button_radius > self.light_radius {
            return Err(RenderError::Config(format!(
                "button radius {} exceeds light radius {}",
                self.button_radius, self.light_radius
            )));
        }
        let (lx, ly) = self.light_dir;
        let len = (lx * lx + ly * ly).sqrt();
        if !len.is_finite() || (len - 1.0).abs() > 1e-9 {
            return Err(RenderError::Config(format!(
                "light direction ({lx}, {ly}) is not a unit vector"
            )));
        }
        let required = self.required_noise_size();
        if self.noise_size < required {
            return Err(RenderError::Config(format!(
                "noise table of {} samples is smaller than the {} needed for this geometry",
                self.noise_size, required
            )));
        }
        if self.glow_intensity.is_nan() || self.glow_intensity < 0.0 {
            return Err(RenderError::Config(format!(
                "glow intensity must be non-negative, got {}",
                self.glow_intensity
            )));
        }
        Ok(())
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_geometry_matches_print_layout() {
        let c = SceneConfig::reference();
        assert_eq!((c.width, c.height), (3300, 4200));
        assert_eq!((c.button_x, c.button_y), (1650, 2100));
        assert_eq!(c.button_radius, 1155);
        assert_eq!(c.light_radius, 1320);
        assert_eq!(c.glow_radius, 99);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn noise_table_must_cover_height_and_light_radius() {
        let mut c = SceneConfig::new(1100, 1400);
        assert_eq!(c.required_noise_size(), 1400);
        c.noise_size = 1399;
        assert!(matches!(c.validate(), Err(RenderError::Config(_))));

        // Wide and short: the light radius dominates.
        let mut c = SceneConfig::new(4000, 10);
        assert_eq!(c.required_noise_size(), 1601);
        c.noise_size = 1600;
        assert!(c.validate().is_err());
        c.noise_size = 1601;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_inverted_radii_and_bad_light() {
        let c = SceneConfig::new(100, 100).with_radii(50, 40);
        assert!(c.validate().is_err());

        let mut c = SceneConfig::new(100, 100);
        c.light_dir = (1.0, 1.0);
        assert!(c.validate().is_err());

        assert!(SceneConfig::new(0, 100).validate().is_err());
    }

    #[test]
    fn zero_button_radius_is_allowed() {
        let c = SceneConfig::new(100, 100).with_radii(0, 0);
        assert!(c.validate().is_ok());
    }
}
