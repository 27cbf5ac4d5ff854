use crate::Error;

/// Vertical font metrics in font units, as read from the `hhea`/`OS/2` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    /// Distance from the baseline to the top of the tallest glyphs
    pub ascent: i16,
    /// Distance from the baseline to the bottom of the lowest glyphs, usually negative
    pub descent: i16,
    /// Extra spacing between lines; a full line is `ascent - descent + line_gap`
    pub line_gap: i16,
}

/// [`FontMetrics`] rounded to whole pixels for one pixel height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledMetrics {
    pub ascent: i32,
    pub descent: i32,
    pub line_gap: i32,
}

impl FontMetrics {
    pub fn from_font_data(data: &[u8]) -> Result<Self, Error> {
        let face = ttf_parser::Face::parse(data, 0).map_err(Error::invalid_font)?;

        let metrics = Self {
            units_per_em: face.units_per_em(),
            ascent: face.ascender(),
            descent: face.descender(),
            line_gap: face.line_gap(),
        };

        if metrics.height() <= 0 {
            return Err(Error::invalid_font(format!(
                "font has no vertical extent (ascent {}, descent {})",
                metrics.ascent, metrics.descent
            )));
        }

        Ok(metrics)
    }

    /// `ascent - descent` in font units.
    pub fn height(&self) -> i32 {
        self.ascent as i32 - self.descent as i32
    }

    /// Scale factor from font units to pixels, so that `ascent - descent`
    /// spans exactly `pixels`.
    pub fn scale_for_pixel_height(&self, pixels: f32) -> f32 {
        pixels / self.height() as f32
    }

    /// The em size (font size in pixels) that yields a glyph height of `pixels`.
    pub fn em_size_for_pixel_height(&self, pixels: f32) -> f32 {
        self.scale_for_pixel_height(pixels) * self.units_per_em as f32
    }

    pub fn scaled(&self, pixels: f32) -> ScaledMetrics {
        let scale = self.scale_for_pixel_height(pixels);
        let round = |units: i16| (units as f32 * scale).round() as i32;

        ScaledMetrics {
            ascent: round(self.ascent),
            descent: round(self.descent),
            line_gap: round(self.line_gap),
        }
    }
}
