//! Histogram bar-chart rendering.
//!
//! The canvas is `2 * border + image_height` rows tall and
//! `2 * border + 3 * bins` columns wide. Each bin is a one-pixel vertical
//! bar rising from the baseline, placed every [`BIN_STRIDE`] columns.
//!
//! Malformed input never raises an error: an invalid histogram shape leaves
//! the target untouched.

use crate::buffer::ColorImage;
use crate::color::Bgr;
use crate::config::{HistogramConfig, BIN_STRIDE, HIST_BORDER};
use crate::glyphs::draw_text;
use crate::histogram::{
    channel_histogram, gray_histogram, max_count, scale_to_height, BinValues, Channel,
    HistogramVector,
};
use imageproc::drawing::draw_line_segment_mut;
use tracing::{debug, trace};

/// Vertical distance from the baseline to the label origin.
const LABEL_OFFSET: i64 = 10;

/// Renders histogram vectors into BGR canvases.
#[derive(Debug, Clone, Default)]
pub struct HistogramRenderer {
    config: HistogramConfig,
}

impl HistogramRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HistogramConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HistogramConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut HistogramConfig {
        &mut self.config
    }

    /// Draw a precomputed histogram whose values are bar heights in pixels.
    ///
    /// `target` is resized to the canvas dimensions if needed and cleared
    /// to the background color. Does nothing if `histogram` is not a
    /// 1-D vector of at least two bins.
    pub fn draw(&self, histogram: &HistogramVector, target: &mut ColorImage, color: Bgr) {
        let Some(len) = histogram.bin_len() else {
            trace!(shape = ?histogram.shape(), "skipping histogram with invalid shape");
            return;
        };

        self.prepare_canvas(target, len);
        self.plot_bins(target, histogram.values(), len, color);
        if self.config.draw_axis() {
            self.draw_axis(target, len);
        }
    }

    /// Draw blue, green and red channel histograms onto one canvas.
    ///
    /// All three are scaled against the largest bin across every channel,
    /// so that bin maps to exactly `image_height` pixels.
    pub fn draw_color_histogram(&self, source: &ColorImage, target: &mut ColorImage) {
        let bins = self.config.bin_count() as usize;
        let counts = Channel::ALL.map(|channel| channel_histogram(source, channel, bins));
        let global_max = counts.iter().map(|c| max_count(c)).max().unwrap_or(0);

        let histograms = counts.map(|c| {
            HistogramVector::column(scale_to_height(&c, global_max, self.config.image_height()))
        });

        let Some(len) = histograms[0].bin_len() else {
            trace!(bins, "bin count too small to draw a color histogram");
            return;
        };

        self.prepare_canvas(target, len);
        for (histogram, color) in histograms.iter().zip([Bgr::BLUE, Bgr::GREEN, Bgr::RED]) {
            self.plot_bins(target, histogram.values(), len, color);
        }
        if self.config.draw_axis() {
            self.draw_axis(target, len);
        }
    }

    /// Draw the luma histogram of `source` using the configured plot color.
    pub fn draw_grayscale_histogram(&self, source: &ColorImage, target: &mut ColorImage) {
        let counts = gray_histogram(source, self.config.bin_count() as usize);
        let max = max_count(&counts);
        let histogram =
            HistogramVector::column(scale_to_height(&counts, max, self.config.image_height()));

        self.draw(&histogram, target, self.config.plot_color());
    }

    /// Size `target` for `len` bins and clear it to the background.
    fn prepare_canvas(&self, target: &mut ColorImage, len: usize) {
        let (width, height) = self.config.canvas_dimensions(len as u32);
        let background = self.config.background_color();

        if target.dimensions() == (width, height) {
            target.fill(background);
        } else {
            debug!(width, height, "allocating histogram canvas");
            *target = ColorImage::filled(width, height, background);
        }
    }

    fn plot_bins(&self, target: &mut ColorImage, values: &BinValues, len: usize, color: Bgr) {
        let baseline = self.config.baseline() as i64;
        for i in 0..len {
            let height = values.pixel_height(i).unwrap_or(0);
            if height <= 0 {
                continue;
            }
            // Anything taller than the canvas is cut at the top edge
            let top = baseline - height.min(baseline);
            let x = (i as u32 * BIN_STRIDE + HIST_BORDER) as f32;
            draw_line_segment_mut(
                target.buffer_mut(),
                (x, baseline as f32),
                (x, top as f32),
                color.to_pixel(),
            );
        }
    }

    fn draw_axis(&self, target: &mut ColorImage, len: usize) {
        let baseline = self.config.baseline();
        let color = self.config.axis_color();
        let border = HIST_BORDER as i64;
        let span = BIN_STRIDE as i64 * len as i64;

        draw_line_segment_mut(
            target.buffer_mut(),
            (border as f32, baseline as f32),
            ((border + span) as f32, baseline as f32),
            color.to_pixel(),
        );

        let label_y = baseline as i64 + LABEL_OFFSET;
        draw_text(target, "0", border - 3, label_y, color);
        let last = (len - 1).to_string();
        draw_text(target, &last, border + span - 10, label_y, color);
    }
}
