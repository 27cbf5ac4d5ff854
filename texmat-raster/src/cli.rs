use std::path::PathBuf;

use clap::Parser;
use texmat_raster::RasterConfig;

#[derive(Parser, Debug)]
#[command(
    name = "texmat-raster",
    about = "Rasterizes text into a single-channel bitmap",
    long_about = "Renders a line of text with a TTF/OTF font into a fixed-size grayscale bitmap, \
                  optionally saving it as PNG or previewing it in the terminal"
)]
pub struct Cli {
    /// Text to rasterize
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Font file (TTF/OTF)
    #[arg(short = 'f', long, default_value = RasterConfig::DEFAULT_FONT_PATH, value_name = "PATH")]
    pub font: PathBuf,

    /// Height of the rendered text in pixels
    #[arg(short = 's', long, default_value = "64.0", value_name = "PIXELS")]
    pub pixel_height: f32,

    /// Bitmap width in pixels
    #[arg(short = 'W', long, default_value_t = RasterConfig::DEFAULT_WIDTH, value_name = "PIXELS")]
    pub width: u32,

    /// Bitmap height in pixels
    #[arg(short = 'H', long, default_value_t = RasterConfig::DEFAULT_HEIGHT, value_name = "PIXELS")]
    pub height: u32,

    /// Write the bitmap to this PNG file
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the rendered bitmap to the terminal
    #[arg(short = 'p', long)]
    pub preview: bool,
}

impl Cli {
    /// Validates the CLI arguments
    pub fn validate(&self) -> Result<(), String> {
        if !self.pixel_height.is_finite() || self.pixel_height <= 0.0 {
            return Err("Pixel height must be positive".to_string());
        }

        if self.width == 0 || self.height == 0 {
            return Err("Bitmap width and height must be positive".to_string());
        }

        if self.pixel_height > self.height as f32 {
            return Err(format!(
                "Pixel height {} does not fit in a bitmap {} pixels tall",
                self.pixel_height, self.height
            ));
        }

        Ok(())
    }

    pub fn raster_config(&self) -> RasterConfig {
        RasterConfig::new(&self.font).with_size(self.width, self.height)
    }

    /// Prints a summary of the configuration
    pub fn print_summary(&self, family: &str) {
        println!("Rasterizing text:");
        println!("  Text: {:?}", self.text);
        println!("  Font: {family} ({})", self.font.display());
        println!("  Size: {}px", self.pixel_height);
        println!("  Bitmap: {}x{}", self.width, self.height);

        if let Some(output) = &self.output {
            println!("  Output: {}", output.display());
        }
    }
}
