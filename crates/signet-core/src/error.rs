//! Error types for Signet

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SignetError>;

/// Main error type for Signet
#[derive(Debug, Error)]
pub enum SignetError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,
}

/// Raster rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid font data")]
    InvalidFont,

    #[error("Glyph outline extraction failed")]
    OutlineExtractionFailed,

    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Canvas allocation failed")]
    PixmapCreationFailed,
}

/// Artifact serialization errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
