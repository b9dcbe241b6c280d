//! Histogram rendering WASM bindings.
//!
//! The renderer keeps its canvas between calls, so repeated renders of the
//! same bin count reuse one buffer in WASM memory.

use crate::types::JsColorImage;
use histlib_core::{Bgr, BinValues, ColorImage, HistogramConfig, HistogramRenderer, HistogramVector};
use wasm_bindgen::prelude::*;

/// Histogram renderer accessible from JavaScript.
///
/// # Example (TypeScript)
/// ```typescript
/// const renderer = new JsHistogramRenderer();
/// renderer.image_height = 200;
/// renderer.set_background_color(32, 32, 32);
///
/// const chart = renderer.draw_color_histogram(image);
/// ctx.putImageData(new ImageData(new Uint8ClampedArray(chart.to_rgba()), chart.width), 0, 0);
///
/// chart.free();
/// renderer.free();
/// ```
#[wasm_bindgen]
pub struct JsHistogramRenderer {
    inner: HistogramRenderer,
    canvas: ColorImage,
}

#[wasm_bindgen]
impl JsHistogramRenderer {
    /// Create a renderer with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::with_config(HistogramConfig::new())
    }

    /// Create a renderer from a settings object.
    ///
    /// Missing fields take their defaults and out-of-range values are ignored.
    ///
    /// # Errors
    /// Returns error if the object cannot be deserialized
    pub fn from_config(value: JsValue) -> Result<JsHistogramRenderer, JsValue> {
        let config: HistogramConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::with_config(config))
    }

    /// Serialize the current settings
    pub fn to_config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Get plot height in pixels
    #[wasm_bindgen(getter)]
    pub fn image_height(&self) -> u32 {
        self.inner.config().image_height()
    }

    /// Set plot height in pixels (1 to 2048, other values ignored)
    #[wasm_bindgen(setter)]
    pub fn set_image_height(&mut self, value: u32) {
        self.inner.config_mut().set_image_height(value);
    }

    /// Get bin count
    #[wasm_bindgen(getter)]
    pub fn bin_count(&self) -> u32 {
        self.inner.config().bin_count()
    }

    /// Set bin count (1 to 256, other values ignored)
    #[wasm_bindgen(setter)]
    pub fn set_bin_count(&mut self, value: u32) {
        self.inner.config_mut().set_bin_count(value);
    }

    /// Get whether the axis and labels are drawn
    #[wasm_bindgen(getter)]
    pub fn draw_axis(&self) -> bool {
        self.inner.config().draw_axis()
    }

    /// Set whether the axis and labels are drawn
    #[wasm_bindgen(setter)]
    pub fn set_draw_axis(&mut self, value: bool) {
        self.inner.config_mut().set_draw_axis(value);
    }

    /// Set bar color for grayscale and precomputed histograms
    pub fn set_plot_color(&mut self, red: u8, green: u8, blue: u8) {
        self.inner.config_mut().set_plot_color(Bgr::new(blue, green, red));
    }

    /// Set axis and label color
    pub fn set_axis_color(&mut self, red: u8, green: u8, blue: u8) {
        self.inner.config_mut().set_axis_color(Bgr::new(blue, green, red));
    }

    /// Set canvas background color
    pub fn set_background_color(&mut self, red: u8, green: u8, blue: u8) {
        self.inner
            .config_mut()
            .set_background_color(Bgr::new(blue, green, red));
    }

    /// Draw precomputed bar heights (in pixels) with the plot color.
    ///
    /// Fewer than two values leave the previous canvas unchanged.
    pub fn draw_bins(&mut self, values: Vec<f32>) -> JsColorImage {
        let histogram = HistogramVector::row(BinValues::F32(values));
        let color = self.inner.config().plot_color();
        self.inner.draw(&histogram, &mut self.canvas, color);
        self.snapshot()
    }

    /// Draw blue, green and red channel histograms of `image`.
    pub fn draw_color_histogram(&mut self, image: &JsColorImage) -> JsColorImage {
        self.inner
            .draw_color_histogram(image.as_core(), &mut self.canvas);
        self.snapshot()
    }

    /// Draw the luma histogram of `image`.
    pub fn draw_grayscale_histogram(&mut self, image: &JsColorImage) -> JsColorImage {
        self.inner
            .draw_grayscale_histogram(image.as_core(), &mut self.canvas);
        self.snapshot()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl Default for JsHistogramRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl JsHistogramRenderer {
    fn with_config(config: HistogramConfig) -> Self {
        Self {
            inner: HistogramRenderer::with_config(config),
            canvas: ColorImage::default(),
        }
    }

    fn snapshot(&self) -> JsColorImage {
        JsColorImage::from_core(self.canvas.clone())
    }
}
