//! Histlib WASM - WebAssembly bindings for Histlib
//!
//! This crate exposes histlib-core histogram rendering and contrast
//! normalization to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - BGR image wrapper with RGBA conversion for canvas use
//! - `histogram` - Histogram renderer bindings
//! - `normalize` - Contrast normalization bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsColorImage, JsHistogramRenderer } from '@histlib/wasm';
//!
//! await init();
//!
//! const image = JsColorImage.from_rgba(width, height, imageData.data);
//! const chart = new JsHistogramRenderer().draw_color_histogram(image);
//! ```

use wasm_bindgen::prelude::*;

mod histogram;
mod normalize;
mod types;

// Re-export public types
pub use histogram::JsHistogramRenderer;
pub use normalize::{normalize_image, normalize_image_clipped};
pub use types::JsColorImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
