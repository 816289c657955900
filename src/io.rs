use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{RenderError, Result};

/// Metres per inch, for the PNG pHYs chunk.
const METRES_PER_INCH: f64 = 0.0254;

// ============================================================================
// CANVAS ALLOCATION
// ============================================================================

/// Opaque white canvas.
pub fn blank_opaque(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
}

/// Fully transparent canvas.
pub fn blank_transparent(width: u32, height: u32) -> RgbaImage {
    RgbaImage::new(width, height)
}

// ============================================================================
// OUTPUT FORMATS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SaveFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
    Tiff,
}

impl SaveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Jpeg => "jpg",
            SaveFormat::Bmp => "bmp",
            SaveFormat::Tiff => "tiff",
        }
    }

    /// Parse a format name or file extension (case-insensitive).
    pub fn from_name(name: &str) -> Option<SaveFormat> {
        match name.to_lowercase().as_str() {
            "png" => Some(SaveFormat::Png),
            "jpeg" | "jpg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            "tiff" | "tif" => Some(SaveFormat::Tiff),
            _ => None,
        }
    }

    /// Infer the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<SaveFormat> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(SaveFormat::from_name)
    }
}

/// Drop the alpha channel; the page is opaque by construction.
fn rgb_bytes(image: &RgbaImage) -> Vec<u8> {
    image
        .as_raw()
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect()
}

fn pixels_per_metre(dpi: u32) -> u32 {
    (dpi as f64 / METRES_PER_INCH).round() as u32
}

// ============================================================================
// ENCODING
// ============================================================================

/// Write `image` to `path` as opaque RGB in the given format. PNG output
/// records `dpi` so the file prints at its intended size.
pub fn encode_and_write(
    image: &RgbaImage,
    path: &Path,
    format: SaveFormat,
    quality: u8,
    dpi: u32,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let rgb = rgb_bytes(image);

    match format {
        SaveFormat::Png => {
            write_png(&mut writer, image.width(), image.height(), &rgb, png::ColorType::Rgb, dpi)?;
        }
        SaveFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
            encoder.encode(&rgb, image.width(), image.height(), image::ColorType::Rgb8)?;
        }
        SaveFormat::Bmp => {
            let mut encoder = BmpEncoder::new(&mut writer);
            encoder.encode(&rgb, image.width(), image.height(), image::ColorType::Rgb8)?;
        }
        SaveFormat::Tiff => {
            let (width, height) = image.dimensions();
            let len = rgb.len();
            let rgb_image = RgbImage::from_raw(width, height, rgb)
                .ok_or(RenderError::Buffer { width, height, len })?;
            rgb_image.write_to(&mut writer, ImageFormat::Tiff)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write `image` as an RGBA PNG, keeping transparency. Used for glow dumps.
pub fn save_rgba_png(image: &RgbaImage, path: &Path, dpi: u32) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_png(&mut writer, image.width(), image.height(), image.as_raw(), png::ColorType::Rgba, dpi)?;
    writer.flush()?;
    Ok(())
}

fn write_png<W: Write>(
    writer: W,
    width: u32,
    height: u32,
    data: &[u8],
    color: png::ColorType,
    dpi: u32,
) -> Result<()> {
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    let ppm = pixels_per_metre(dpi);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));
    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(data)?;
    png_writer.finish()?;
    Ok(())
}
