use std::{fs, path::Path};

use compact_str::{CompactString, ToCompactString};
use cosmic_text::{fontdb, Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache};
use image::{GrayImage, ImageFormat, Luma};

use crate::{Error, FontMetrics, RasterConfig};

const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
const LOCALE: &str = "en-US";

/// Renders text into a fixed-size, single-channel bitmap.
///
/// The bitmap is row-major with one coverage byte per pixel, and can be
/// handed directly to a `GL_R8`/`GL_RED` texture upload. Every call to
/// [`render`](Self::render) clears the bitmap first.
pub struct TextRasterizer {
    config: RasterConfig,
    font_system: FontSystem,
    cache: SwashCache,
    family: CompactString,
    metrics: FontMetrics,
    bitmap: Vec<u8>,
}

/// Summary of a single [`TextRasterizer::render`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Horizontal pen advance in pixels, kerning included
    pub advance: i32,
    /// Number of shaped glyphs
    pub glyphs: usize,
    /// Covered pixels that fell outside the bitmap and were dropped
    pub clipped_pixels: usize,
}

impl RenderStats {
    pub fn is_clipped(&self) -> bool {
        self.clipped_pixels > 0
    }
}

impl TextRasterizer {
    /// Loads the font at `config.font_path` and allocates a zeroed bitmap.
    pub fn new(config: RasterConfig) -> Result<Self, Error> {
        let data = fs::read(&config.font_path)
            .map_err(|e| Error::font_load(&config.font_path, e))?;

        Self::from_font_data(config, data)
    }

    /// Like [`new`](Self::new), with the font already in memory.
    /// `config.font_path` is only kept as a label.
    pub fn from_font_data(config: RasterConfig, data: Vec<u8>) -> Result<Self, Error> {
        config.validate()?;
        let metrics = FontMetrics::from_font_data(&data)?;

        let mut db = fontdb::Database::new();
        db.load_font_data(data);

        let family = db
            .faces()
            .next()
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.to_compact_string())
            .ok_or_else(|| Error::invalid_font("no usable font face"))?;

        tracing::debug!(
            font = %config.font_path.display(),
            %family,
            units_per_em = metrics.units_per_em,
            width = config.width,
            height = config.height,
            "font loaded"
        );

        Ok(Self {
            bitmap: vec![0; config.bitmap_len()],
            font_system: FontSystem::new_with_locale_and_db(LOCALE.to_string(), db),
            cache: SwashCache::new(),
            family,
            metrics,
            config,
        })
    }

    /// Rasterizes `text` so that the font's ascent-to-descent span is
    /// `pixel_height` pixels tall, starting at the left edge of the bitmap.
    ///
    /// The baseline sits at the rounded scaled ascent. Advance widths and
    /// kerning come from shaping. Glyph pixels outside the bitmap are dropped
    /// and counted in [`RenderStats::clipped_pixels`]. A `\n` starts another
    /// line `pixel_height` below the first, usually clipped, and `\t` advances
    /// to the shaper's tab stops. Text that produces no advance at all yields
    /// [`Error::NothingRendered`], leaving the bitmap cleared.
    pub fn render(&mut self, text: &str, pixel_height: f32) -> Result<RenderStats, Error> {
        if !pixel_height.is_finite() || pixel_height <= 0.0 {
            return Err(Error::InvalidPixelHeight(pixel_height));
        }

        self.bitmap.fill(0);

        let font_size = self.metrics.em_size_for_pixel_height(pixel_height);
        let baseline = self.metrics.scaled(pixel_height).ascent;
        let Self { config, font_system, cache, family, bitmap, .. } = self;

        let mut buffer = Buffer::new(font_system, Metrics::new(font_size, pixel_height));
        buffer.set_size(font_system, None, None);

        let attrs = Attrs::new().family(Family::Name(family.as_str()));
        buffer.set_text(font_system, text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(font_system, false);

        let (line_width, glyphs) = buffer
            .layout_runs()
            .fold((0.0f32, 0usize), |(w, n), run| (w.max(run.line_w), n + run.glyphs.len()));

        let advance = line_width.round() as i32;
        if advance == 0 {
            tracing::debug!(text, pixel_height, "text produced no advance");
            return Err(Error::NothingRendered);
        }

        // draw truncates line_y; shift the first line onto the rounded ascent
        let y_offset = buffer
            .layout_runs()
            .next()
            .map_or(0, |run| baseline - run.line_y as i32);

        let width = config.width as i32;
        let height = config.height as i32;
        let mut clipped_pixels = 0;

        buffer.draw(font_system, cache, WHITE, |x, y, w, h, color| {
            let coverage = color.a();
            if coverage == 0 {
                return;
            }

            let y = y + y_offset;
            for py in y..y + h as i32 {
                for px in x..x + w as i32 {
                    if px < 0 || py < 0 || px >= width || py >= height {
                        clipped_pixels += 1;
                        continue;
                    }

                    let idx = py as usize * width as usize + px as usize;
                    bitmap[idx] = bitmap[idx].max(coverage);
                }
            }
        });

        let stats = RenderStats { advance, glyphs, clipped_pixels };
        if stats.is_clipped() {
            tracing::warn!(
                text,
                pixel_height,
                clipped_pixels,
                "rendered text exceeds the {}x{} bitmap",
                width,
                height
            );
        }

        tracing::debug!(text, pixel_height, font_size, baseline, ?stats, "text rendered");
        Ok(stats)
    }

    /// Row-major coverage values, one byte per pixel.
    pub fn bitmap(&self) -> &[u8] {
        &self.bitmap
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.config.dimensions()
    }

    pub fn font_path(&self) -> &Path {
        self.config.font_path()
    }

    pub fn family_name(&self) -> &str {
        &self.family
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &RasterConfig {
        &self.config
    }

    /// Copies the bitmap into a grayscale image.
    pub fn to_image(&self) -> GrayImage {
        let (width, height) = self.dimensions();
        GrayImage::from_fn(width, height, |x, y| {
            Luma([self.bitmap[y as usize * width as usize + x as usize]])
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        self.to_image().save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    const FONT: &[u8] = include_bytes!("../../data/DejaVuSansMono.ttf");
    const PROPORTIONAL_FONT: &[u8] = include_bytes!("../../data/DejaVuSans.ttf");

    fn font_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../data/DejaVuSansMono.ttf")
    }

    fn rasterizer(width: u32, height: u32) -> TextRasterizer {
        let config = RasterConfig::new("DejaVuSansMono.ttf").with_size(width, height);
        TextRasterizer::from_font_data(config, FONT.to_vec()).unwrap()
    }

    fn last_covered_row(r: &TextRasterizer) -> Option<usize> {
        let (width, _) = r.dimensions();
        r.bitmap()
            .chunks(width as usize)
            .rposition(|row| row.iter().any(|&v| v > 0))
    }

    fn coverage(r: &TextRasterizer) -> u64 {
        r.bitmap().iter().map(|&v| v as u64).sum()
    }

    #[test]
    fn test_new_allocates_zeroed_bitmap() {
        let config = RasterConfig::new(font_path()).with_size(500, 100);
        let r = TextRasterizer::new(config).unwrap();

        assert_eq!(r.dimensions(), (500, 100));
        assert_eq!(r.bitmap().len(), 500 * 100);
        assert!(r.bitmap().iter().all(|&v| v == 0));
        assert_eq!(r.font_path(), font_path().as_path());
        assert_eq!(r.family_name(), "DejaVu Sans Mono");
    }

    #[test]
    fn test_new_with_missing_font_file() {
        let config = RasterConfig::new("/nonexistent/fonts/missing.ttf");
        let result = TextRasterizer::new(config.clone());

        match result {
            Err(Error::FontLoad { path, .. }) => assert_eq!(path, config.font_path),
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("expected a font load error"),
        }

        // the configuration itself stays usable
        assert_eq!(config.dimensions(), (512, 128));
    }

    #[test]
    fn test_invalid_font_data() {
        let config = RasterConfig::default();
        let result = TextRasterizer::from_font_data(config, vec![0u8; 64]);

        assert!(matches!(result, Err(Error::InvalidFont(_))));
    }

    #[test]
    fn test_invalid_config() {
        let config = RasterConfig::default().with_size(0, 128);
        let result = TextRasterizer::from_font_data(config, FONT.to_vec());

        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_render_text() {
        let mut r = rasterizer(512, 128);
        let stats = r.render("Hello", 64.0).unwrap();

        assert_eq!(stats.glyphs, 5);
        assert!(stats.advance > 0);
        assert!(stats.advance < 512);
        assert_eq!(stats.clipped_pixels, 0);
        assert!(coverage(&r) > 0);

        // no descenders, so the baseline bounds the coverage
        let baseline = r.metrics().scaled(64.0).ascent as usize;
        assert_eq!(last_covered_row(&r), Some(baseline - 1));
    }

    #[test]
    fn test_render_baseline_at_rounded_ascent() {
        let mut r = rasterizer(256, 128);

        for pixel_height in [16.0, 32.0, 64.0, 100.0] {
            r.render("H", pixel_height).unwrap();

            let baseline = r.metrics().scaled(pixel_height).ascent as usize;
            assert_eq!(
                last_covered_row(&r),
                Some(baseline - 1),
                "baseline at {pixel_height}px"
            );
        }
    }

    #[test]
    fn test_render_applies_kerning() {
        let config = RasterConfig::new("DejaVuSans.ttf").with_size(256, 64);
        let mut r = TextRasterizer::from_font_data(config, PROPORTIONAL_FONT.to_vec()).unwrap();
        assert_eq!(r.family_name(), "DejaVu Sans");

        let a = r.render("A", 48.0).unwrap().advance;
        let v = r.render("V", 48.0).unwrap().advance;
        let av = r.render("AV", 48.0).unwrap().advance;

        assert!(av < a + v, "AV={av} A={a} V={v}");
    }

    #[test]
    fn test_render_newline_starts_line_below() {
        let mut r = rasterizer(256, 64);
        let single = r.render("H", 64.0).unwrap();
        let single_bitmap = r.bitmap().to_vec();

        let stats = r.render("H\nH", 64.0).unwrap();

        // the second line lands below the bitmap and only adds clipped pixels
        assert_eq!(stats.glyphs, 2);
        assert_eq!(stats.advance, single.advance);
        assert!(stats.clipped_pixels > single.clipped_pixels);
        assert_eq!(r.bitmap(), single_bitmap.as_slice());
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut r = rasterizer(256, 64);

        let first_stats = r.render("fps 60", 32.0).unwrap();
        let first = r.bitmap().to_vec();
        let second_stats = r.render("fps 60", 32.0).unwrap();

        assert_eq!(first_stats, second_stats);
        assert_eq!(first, r.bitmap());
    }

    #[test]
    fn test_render_overwrites_previous_contents() {
        let mut fresh = rasterizer(256, 64);
        fresh.render(".", 32.0).unwrap();

        let mut reused = rasterizer(256, 64);
        reused.render("WWWWWW", 32.0).unwrap();
        reused.render(".", 32.0).unwrap();

        assert_eq!(fresh.bitmap(), reused.bitmap());
    }

    #[test]
    fn test_render_advance_grows_with_text() {
        let mut r = rasterizer(512, 64);

        let short = r.render("ab", 32.0).unwrap();
        let long = r.render("abcd", 32.0).unwrap();

        assert!(long.advance > short.advance);
    }

    #[test]
    fn test_render_empty_text() {
        let mut r = rasterizer(128, 32);
        r.render("x", 24.0).unwrap();

        let result = r.render("", 24.0);
        assert!(matches!(result, Err(Error::NothingRendered)));
        assert_eq!(coverage(&r), 0);
    }

    #[test]
    fn test_render_invalid_pixel_height() {
        let mut r = rasterizer(128, 32);

        assert!(matches!(r.render("x", 0.0), Err(Error::InvalidPixelHeight(_))));
        assert!(matches!(r.render("x", -12.0), Err(Error::InvalidPixelHeight(_))));
        assert!(matches!(r.render("x", f32::NAN), Err(Error::InvalidPixelHeight(_))));
    }

    #[test]
    fn test_render_clips_horizontal_overflow() {
        let mut r = rasterizer(512, 128);
        let stats = r.render(&"W".repeat(24), 64.0).unwrap();

        assert!(stats.advance > 512);
        assert!(stats.is_clipped());
        assert_eq!(r.bitmap().len(), 512 * 128);

        // the last column is covered by the clipped run of glyphs
        let last_column_coverage: u32 =
            (0..128).map(|y| r.bitmap()[y * 512 + 511] as u32).sum();
        assert!(last_column_coverage > 0);
    }

    #[test]
    fn test_render_clips_vertical_overflow() {
        let mut r = rasterizer(128, 24);
        let stats = r.render("H", 64.0).unwrap();

        assert!(stats.is_clipped());
        assert!(coverage(&r) > 0);
    }

    #[test]
    fn test_to_image() {
        let mut r = rasterizer(64, 32);
        r.render("A", 24.0).unwrap();

        let image = r.to_image();
        assert_eq!(image.dimensions(), (64, 32));
        assert_eq!(image.as_raw().as_slice(), r.bitmap());
    }

    #[test]
    fn test_save_png() {
        let mut r = rasterizer(96, 32);
        r.render("png", 24.0).unwrap();

        let path = std::env::temp_dir().join(format!("texmat-raster-{}.png", std::process::id()));
        r.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_luma8();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.dimensions(), (96, 32));
        assert_eq!(loaded.as_raw().as_slice(), r.bitmap());
    }
}
