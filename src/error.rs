use thiserror::Error;

/// Errors that can occur while saving, loading or resizing the drawing
#[derive(Debug, Error)]
pub enum PaintError {
    /// Surface dimensions were zero, negative or not finite
    #[error("Invalid surface size ({width}x{height})")]
    InvalidSurfaceSize { width: f32, height: f32 },

    /// The image codec rejected the data
    #[error("Image codec error: {0}")]
    Codec(image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Pixel data could not be converted between formats
    #[error("Pixel conversion failed: {0}")]
    Conversion(String),

    /// The background file task went away without reporting a result
    #[error("The file task ended before reporting a result")]
    TaskAborted,
}

impl PaintError {
    /// Short title used for the error dialog
    pub fn title(&self) -> &'static str {
        match self {
            Self::InvalidSurfaceSize { .. } => "Size error",
            Self::Codec(_) => "Image format error",
            Self::Io(_) => "I/O error",
            Self::Conversion(_) => "Conversion error",
            Self::TaskAborted => "Unexpected error",
        }
    }
}

impl From<image::ImageError> for PaintError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Codec(other),
        }
    }
}

pub type PaintResult<T> = Result<T, PaintError>;

/// Validates a floating point size and rounds it up to whole pixels
pub fn pixel_size(width: f32, height: f32) -> PaintResult<(u32, u32)> {
    let valid = |v: f32| v.is_finite() && v > 0.0 && v <= u32::MAX as f32;
    if !valid(width) || !valid(height) {
        return Err(PaintError::InvalidSurfaceSize { width, height });
    }
    Ok((width.ceil() as u32, height.ceil() as u32))
}
