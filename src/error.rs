use thiserror::Error;

/// Errors surfaced at the fallible edges of the canvas (export, settings,
/// access before the surface exists). Pixel and gesture operations never
/// produce these; they degrade to no-ops instead.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("raster surface has not been initialized")]
    NotInitialized,
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type CanvasResult<T> = Result<T, CanvasError>;
