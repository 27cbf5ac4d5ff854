mod config;
mod error;
mod metrics;
mod rasterizer;

pub use crate::{
    config::RasterConfig,
    error::Error,
    metrics::{FontMetrics, ScaledMetrics},
    rasterizer::{RenderStats, TextRasterizer},
};
