//! Histlib Core - Histogram rendering and contrast normalization
//!
//! This crate computes per-channel intensity histograms from 8-bit BGR
//! images, renders them as bar charts, and stretches image contrast on the
//! HSV value channel (optionally ignoring a percentage of outlier pixels).
//!
//! # Example
//!
//! ```ignore
//! use histlib_core::{normalize_clipped, ColorImage, HistogramRenderer};
//!
//! let image = ColorImage::from_raw(width, height, bgr_bytes)?;
//!
//! let renderer = HistogramRenderer::new();
//! let mut canvas = ColorImage::default();
//! renderer.draw_color_histogram(&image, &mut canvas);
//!
//! let stretched = normalize_clipped(&image, 1.0);
//! ```

pub mod buffer;
pub mod color;
pub mod config;
mod glyphs;
pub mod histogram;
pub mod normalize;
pub mod render;

pub use buffer::{ColorImage, HsvImage, ImageError};
pub use color::{Bgr, HsvPixel};
pub use config::HistogramConfig;
pub use histogram::{BinValues, Channel, HistogramVector};
pub use normalize::{normalize, normalize_clipped, ContrastNormalizer, NormalizationBounds};
pub use render::HistogramRenderer;
