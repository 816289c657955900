use thiserror::Error;

/// Everything that can stop a render. Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Scene geometry or noise table failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A raw pixel buffer did not match the expected dimensions.
    #[error("pixel buffer of {len} bytes does not fit {width}x{height}")]
    Buffer { width: u32, height: u32, len: usize },

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
