//! Histogram canvas configuration.
//!
//! All setters silently ignore out-of-range values and keep the previous
//! setting, so a `HistogramConfig` is always in a drawable state.

use crate::color::Bgr;
use serde::{Deserialize, Serialize};

/// Largest accepted plot height in pixels.
pub const MAX_IMAGE_HEIGHT: u32 = 2048;

/// Largest accepted bin count (one bin per 8-bit level).
pub const MAX_BIN_COUNT: u32 = 256;

/// Padding around the plot area on every side, in pixels.
pub const HIST_BORDER: u32 = 15;

/// Horizontal distance between adjacent bins, in pixels.
pub const BIN_STRIDE: u32 = 3;

/// Default plot height in pixels.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 300;

/// Rendering settings for histogram images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawHistogramConfig")]
pub struct HistogramConfig {
    image_height: u32,
    bin_count: u32,
    plot_color: Bgr,
    axis_color: Bgr,
    background_color: Bgr,
    draw_axis: bool,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            image_height: DEFAULT_IMAGE_HEIGHT,
            bin_count: MAX_BIN_COUNT,
            plot_color: Bgr::WHITE,
            axis_color: Bgr::WHITE,
            background_color: Bgr::BLACK,
            draw_axis: true,
        }
    }
}

impl HistogramConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plot area height in pixels, excluding the border.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn bin_count(&self) -> u32 {
        self.bin_count
    }

    /// Border padding in pixels. Fixed at [`HIST_BORDER`].
    pub fn border(&self) -> u32 {
        HIST_BORDER
    }

    pub fn plot_color(&self) -> Bgr {
        self.plot_color
    }

    pub fn axis_color(&self) -> Bgr {
        self.axis_color
    }

    pub fn background_color(&self) -> Bgr {
        self.background_color
    }

    pub fn draw_axis(&self) -> bool {
        self.draw_axis
    }

    /// Set the plot height. Values outside `1..=2048` are ignored.
    pub fn set_image_height(&mut self, height: u32) {
        if (1..=MAX_IMAGE_HEIGHT).contains(&height) {
            self.image_height = height;
        }
    }

    /// Set the bin count. Values outside `1..=256` are ignored.
    pub fn set_bin_count(&mut self, bins: u32) {
        if (1..=MAX_BIN_COUNT).contains(&bins) {
            self.bin_count = bins;
        }
    }

    pub fn set_plot_color(&mut self, color: Bgr) {
        self.plot_color = color;
    }

    pub fn set_axis_color(&mut self, color: Bgr) {
        self.axis_color = color;
    }

    pub fn set_background_color(&mut self, color: Bgr) {
        self.background_color = color;
    }

    pub fn set_draw_axis(&mut self, draw: bool) {
        self.draw_axis = draw;
    }

    /// Y coordinate of the horizontal axis (bottom of every bar).
    #[inline]
    pub fn baseline(&self) -> u32 {
        HIST_BORDER + self.image_height
    }

    /// Canvas `(width, height)` for a histogram with `bin_len` bins.
    pub fn canvas_dimensions(&self, bin_len: u32) -> (u32, u32) {
        (
            2 * HIST_BORDER + BIN_STRIDE * bin_len,
            2 * HIST_BORDER + self.image_height,
        )
    }
}

/// Unchecked wire form; converted through the setters on deserialize.
#[derive(Deserialize)]
#[serde(default)]
struct RawHistogramConfig {
    image_height: u32,
    bin_count: u32,
    plot_color: Bgr,
    axis_color: Bgr,
    background_color: Bgr,
    draw_axis: bool,
}

impl Default for RawHistogramConfig {
    fn default() -> Self {
        let defaults = HistogramConfig::default();
        Self {
            image_height: defaults.image_height,
            bin_count: defaults.bin_count,
            plot_color: defaults.plot_color,
            axis_color: defaults.axis_color,
            background_color: defaults.background_color,
            draw_axis: defaults.draw_axis,
        }
    }
}

impl From<RawHistogramConfig> for HistogramConfig {
    fn from(raw: RawHistogramConfig) -> Self {
        let mut config = HistogramConfig::default();
        config.set_image_height(raw.image_height);
        config.set_bin_count(raw.bin_count);
        config.set_plot_color(raw.plot_color);
        config.set_axis_color(raw.axis_color);
        config.set_background_color(raw.background_color);
        config.set_draw_axis(raw.draw_axis);
        config
    }
}
