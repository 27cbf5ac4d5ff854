use std::path::{Path, PathBuf};

/// Error categories.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Bitmap dimensions or other settings are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The font file could not be opened or read.
    #[error("Unable to read font file {}: {source}", .path.display())]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The font data was read but could not be parsed as a font.
    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    /// The requested pixel height is zero, negative or not finite.
    #[error("Invalid pixel height: {0}")]
    InvalidPixelHeight(f32),

    /// The text produced no horizontal advance; the bitmap is left blank.
    #[error("Nothing rendered: text produced zero advance")]
    NothingRendered,

    /// Encoding or writing the bitmap as an image failed.
    #[error("Image export error: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    pub fn font_load(path: &Path, source: std::io::Error) -> Self {
        Self::FontLoad { path: path.to_path_buf(), source }
    }

    pub fn invalid_font(detail: impl std::fmt::Display) -> Self {
        Self::InvalidFont(detail.to_string())
    }

    pub fn zero_dimension(width: u32, height: u32) -> Self {
        Self::InvalidConfig(format!("Bitmap dimensions must be non-zero, got {width}x{height}"))
    }
}
