mod cli;
mod preview;

use clap::Parser;
use color_eyre::eyre::eyre;
use texmat_raster::TextRasterizer;
use tracing_subscriber::EnvFilter;

use crate::{cli::Cli, preview::render_preview};

fn main() -> color_eyre::Result<()> {
    // panic hook
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // parse and validate command line arguments
    let cli = Cli::parse();
    cli.validate().map_err(|e| eyre!(e))?;

    let mut rasterizer = TextRasterizer::new(cli.raster_config())?;
    cli.print_summary(rasterizer.family_name());

    let stats = rasterizer.render(&cli.text, cli.pixel_height)?;

    println!("\nText rasterized!");
    println!("Glyphs: {}", stats.glyphs);
    println!("Advance: {}px", stats.advance);
    if stats.is_clipped() {
        println!("Clipped pixels: {}", stats.clipped_pixels);
    }

    if let Some(output) = &cli.output {
        rasterizer.save_png(output)?;
        println!("Saved bitmap to {}", output.display());
    }

    if cli.preview {
        let (width, height) = rasterizer.dimensions();
        let columns = stats.advance.max(0) as usize;
        println!();
        print!(
            "{}",
            render_preview(rasterizer.bitmap(), width as usize, height as usize, columns)
        );
    }

    Ok(())
}
