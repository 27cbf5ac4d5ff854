use std::path::{Path, PathBuf};

use crate::Error;

/// Bitmap dimensions and font source for a [`TextRasterizer`](crate::TextRasterizer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterConfig {
    /// Width of the output bitmap in pixels
    pub width: u32,
    /// Height of the output bitmap in pixels
    pub height: u32,
    /// Path of the TTF/OTF font file
    pub font_path: PathBuf,
}

impl RasterConfig {
    pub const DEFAULT_WIDTH: u32 = 512;
    pub const DEFAULT_HEIGHT: u32 = 128;
    pub const DEFAULT_FONT_PATH: &'static str = "/system/bin/fonts/arial.ttf";

    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self { font_path: font_path.into(), ..Self::default() }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::zero_dimension(self.width, self.height));
        }

        // pixel coordinates are signed during glyph placement
        let addressable = i32::try_from(self.width).is_ok()
            && i32::try_from(self.height).is_ok()
            && (self.width as i32).checked_mul(self.height as i32).is_some();

        if !addressable {
            return Err(Error::InvalidConfig(format!(
                "Bitmap dimensions {}x{} are too large",
                self.width, self.height
            )));
        }

        Ok(())
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// Number of bytes in the single-channel bitmap.
    pub fn bitmap_len(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            font_path: PathBuf::from(Self::DEFAULT_FONT_PATH),
        }
    }
}
