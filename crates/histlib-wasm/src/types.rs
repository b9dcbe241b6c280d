//! WASM-compatible wrapper for BGR image data.
//!
//! Browser canvases hand out RGBA bytes; this wrapper converts to and from
//! the BGR layout the core library works in.

use histlib_core::{Bgr, ColorImage};
use wasm_bindgen::prelude::*;

/// A BGR image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` and `to_rgba()` copy
/// it out to JavaScript. The `free()` method can be called to release WASM
/// memory early; otherwise wasm-bindgen's finalizer handles cleanup.
#[wasm_bindgen]
pub struct JsColorImage {
    inner: ColorImage,
}

#[wasm_bindgen]
impl JsColorImage {
    /// Create an image from BGR pixel data (3 bytes per pixel, row-major).
    ///
    /// # Errors
    /// Returns error if `pixels.length != width * height * 3`
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsColorImage, JsValue> {
        ColorImage::from_raw(width, height, pixels)
            .map(Self::from_core)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Create an image from canvas `ImageData` bytes (RGBA, alpha ignored).
    ///
    /// # Errors
    /// Returns error if `rgba.length != width * height * 4` or the
    /// dimensions overflow
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<JsColorImage, JsValue> {
        bgr_from_rgba(width, height, rgba)
            .map(Self::from_core)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.as_raw().len()
    }

    /// Returns BGR pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_raw().to_vec()
    }

    /// Returns opaque RGBA bytes ready for `new ImageData(...)`.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.inner.pixel_count() * 4);
        for Bgr { blue, green, red } in self.inner.pixels() {
            out.extend_from_slice(&[red, green, blue, 255]);
        }
        out
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsColorImage {
    pub(crate) fn from_core(inner: ColorImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &ColorImage {
        &self.inner
    }
}

fn bgr_from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<ColorImage, String> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| format!("Invalid dimensions: {}x{}", width, height))?;
    if rgba.len() != expected {
        return Err(format!(
            "Invalid RGBA data: expected {} bytes, got {}",
            expected,
            rgba.len()
        ));
    }

    let bgr = rgba
        .chunks_exact(4)
        .flat_map(|c| [c[2], c[1], c[0]])
        .collect();
    ColorImage::from_raw(width, height, bgr).map_err(|e| e.to_string())
}
