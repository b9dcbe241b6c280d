//! Owned pixel buffers exchanged with callers.

use crate::color::{bgr_to_hsv, hsv_to_bgr, Bgr, HsvPixel};
use image::RgbImage;
use thiserror::Error;

/// Errors raised when building an image from caller-supplied bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width times height does not fit in memory
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// A 3-channel 8-bit image with bytes in B,G,R order, row-major.
///
/// The storage is an `image::RgbImage` so the `image`/`imageproc` drawing
/// routines can write into it directly; only the channel meaning differs.
/// The default value is the empty 0x0 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    buffer: RgbImage,
}

impl Default for ColorImage {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ColorImage {
    /// Create a zeroed (black) image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: RgbImage::new(width, height),
        }
    }

    /// Create an image with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Bgr) -> Self {
        Self {
            buffer: RgbImage::from_pixel(width, height, color.to_pixel()),
        }
    }

    /// Wrap raw BGR bytes (3 bytes per pixel, row-major order).
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(3))
            .ok_or(ImageError::InvalidDimensions { width, height })?;
        if pixels.len() != expected {
            return Err(ImageError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        let buffer = RgbImage::from_raw(width, height, pixels).ok_or(ImageError::InvalidPixelData {
            expected,
            actual: expected,
        })?;
        Ok(Self { buffer })
    }

    /// Build from an RGB-ordered `image::RgbImage`, swapping to BGR.
    pub fn from_rgb_image(mut img: RgbImage) -> Self {
        for pixel in img.pixels_mut() {
            pixel.0.swap(0, 2);
        }
        Self { buffer: img }
    }

    /// Copy out as an RGB-ordered `image::RgbImage` for encoding or display.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut img = self.buffer.clone();
        for pixel in img.pixels_mut() {
            pixel.0.swap(0, 2);
        }
        img
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Read the pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Bgr {
        Bgr::from_bytes(self.buffer.get_pixel(x, y).0)
    }

    /// Read the pixel at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Bgr> {
        self.buffer
            .get_pixel_checked(x, y)
            .map(|p| Bgr::from_bytes(p.0))
    }

    /// Write the pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Bgr) {
        self.buffer.put_pixel(x, y, color.to_pixel());
    }

    /// Iterate over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Bgr> + '_ {
        self.buffer.pixels().map(|p| Bgr::from_bytes(p.0))
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Bgr) {
        let pixel = color.to_pixel();
        for p in self.buffer.pixels_mut() {
            *p = pixel;
        }
    }

    /// Raw BGR bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.buffer.into_raw()
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut RgbImage {
        &mut self.buffer
    }
}

/// An image held in 8-bit HSV form, one [`HsvPixel`] per location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HsvImage {
    width: u32,
    height: u32,
    pixels: Vec<HsvPixel>,
}

impl HsvImage {
    /// Convert every pixel of a BGR image.
    pub fn from_bgr(image: &ColorImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.pixels().map(bgr_to_hsv).collect(),
        }
    }

    /// Convert back to a BGR image of the same dimensions.
    pub fn to_bgr(&self) -> ColorImage {
        let mut out = ColorImage::new(self.width, self.height);
        for (dst, src) in out.buffer_mut().pixels_mut().zip(self.pixels.iter()) {
            *dst = hsv_to_bgr(*src).to_pixel();
        }
        out
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<&HsvPixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize)
    }

    pub fn pixels(&self) -> &[HsvPixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [HsvPixel] {
        &mut self.pixels
    }

    /// Iterate over the value (brightness) channel.
    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.pixels.iter().map(|p| p.value)
    }
}
