//! Contrast normalization WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { normalize_image_clipped, JsColorImage } from '@histlib/wasm';
//!
//! const image = JsColorImage.from_rgba(width, height, imageData.data);
//! const stretched = normalize_image_clipped(image, 1.0);
//! ```

use crate::types::JsColorImage;
use histlib_core::normalize;
use wasm_bindgen::prelude::*;

/// Stretch brightness so the darkest and brightest pixels span 0-255.
///
/// Hue and saturation are preserved. An image with a single brightness
/// level is returned unchanged.
#[wasm_bindgen]
pub fn normalize_image(image: &JsColorImage) -> JsColorImage {
    JsColorImage::from_core(normalize::normalize(image.as_core()))
}

/// Stretch brightness while ignoring `clip_percent` of outlier pixels.
///
/// Half of the clipped pixels are taken from each end of the brightness
/// histogram. `clip_percent` is clamped to 0-100.
#[wasm_bindgen]
pub fn normalize_image_clipped(image: &JsColorImage, clip_percent: f64) -> JsColorImage {
    JsColorImage::from_core(normalize::normalize_clipped(image.as_core(), clip_percent))
}
