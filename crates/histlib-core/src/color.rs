//! Color types and 8-bit color space conversions.
//!
//! Pixels travel through the library in B,G,R byte order. The HSV form uses
//! the common 8-bit packing: hue is stored as degrees / 2 so that the full
//! circle fits in `0..180`, while saturation and value span `0..=255`.

use serde::{Deserialize, Serialize};

/// ITU-R BT.601 coefficient for the red channel in luma calculation.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for the green channel in luma calculation.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for the blue channel in luma calculation.
pub const LUMA_B: f32 = 0.114;

/// Number of distinct 8-bit hue values (degrees / 2).
pub const HUE_RANGE: u16 = 180;

/// A 3-component 8-bit color in blue, green, red order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bgr {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Bgr {
    pub const WHITE: Bgr = Bgr::new(255, 255, 255);
    pub const BLACK: Bgr = Bgr::new(0, 0, 0);
    pub const BLUE: Bgr = Bgr::new(255, 0, 0);
    pub const GREEN: Bgr = Bgr::new(0, 255, 0);
    pub const RED: Bgr = Bgr::new(0, 0, 255);

    pub const fn new(blue: u8, green: u8, red: u8) -> Self {
        Self { blue, green, red }
    }

    /// A neutral gray with every channel set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Raw bytes in storage order.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Pixel value for drawing into a [`crate::ColorImage`] buffer.
    ///
    /// The buffer stores B,G,R bytes inside `image::Rgb` slots, so the bytes
    /// are passed through without reordering.
    #[inline]
    pub(crate) fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb(self.to_bytes())
    }
}

/// One pixel in 8-bit HSV form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HsvPixel {
    /// Hue in degrees / 2 (0 to 179)
    pub hue: u8,
    /// Saturation (0 to 255)
    pub saturation: u8,
    /// Value, the brightness channel (0 to 255)
    pub value: u8,
}

impl HsvPixel {
    pub const fn new(hue: u8, saturation: u8, value: u8) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }
}

/// Convert a BGR color to 8-bit HSV.
///
/// The value channel is exactly `max(blue, green, red)`.
pub fn bgr_to_hsv(color: Bgr) -> HsvPixel {
    let Bgr { blue, green, red } = color;
    let max = blue.max(green).max(red);
    let min = blue.min(green).min(red);

    if max == 0 {
        return HsvPixel::new(0, 0, 0);
    }

    let delta = (max - min) as f32;
    let saturation = (delta * 255.0 / max as f32).round() as u8;

    if max == min {
        return HsvPixel::new(0, saturation, max);
    }

    let (r, g, b) = (red as f32, green as f32, blue as f32);
    let mut degrees = if max == red {
        60.0 * (g - b) / delta
    } else if max == green {
        120.0 + 60.0 * (b - r) / delta
    } else {
        240.0 + 60.0 * (r - g) / delta
    };
    if degrees < 0.0 {
        degrees += 360.0;
    }

    let hue = ((degrees / 2.0).round() as u16 % HUE_RANGE) as u8;
    HsvPixel::new(hue, saturation, max)
}

/// Convert an 8-bit HSV pixel back to BGR.
///
/// Achromatic pixels (zero saturation) come back as exact grays.
pub fn hsv_to_bgr(pixel: HsvPixel) -> Bgr {
    let HsvPixel {
        hue,
        saturation,
        value,
    } = pixel;

    if saturation == 0 {
        return Bgr::gray(value);
    }

    let v = value as f32 / 255.0;
    let s = saturation as f32 / 255.0;
    let sector = (hue as f32 * 2.0 / 60.0) % 6.0;
    let index = sector.floor();
    let f = sector - index;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match index as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Bgr::new(to_byte(b), to_byte(g), to_byte(r))
}

/// Calculate BT.601 luma from a BGR color.
///
/// Returns a value in range 0-255.
#[inline]
pub fn luma_u8(color: Bgr) -> u8 {
    let luma =
        LUMA_R * color.red as f32 + LUMA_G * color.green as f32 + LUMA_B * color.blue as f32;
    luma.clamp(0.0, 255.0).round() as u8
}

#[inline]
fn to_byte(unit: f32) -> u8 {
    (unit * 255.0).clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMA_R + LUMA_G + LUMA_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_named_colors_byte_order() {
        assert_eq!(Bgr::BLUE.to_bytes(), [255, 0, 0]);
        assert_eq!(Bgr::GREEN.to_bytes(), [0, 255, 0]);
        assert_eq!(Bgr::RED.to_bytes(), [0, 0, 255]);
        assert_eq!(Bgr::from_bytes([1, 2, 3]), Bgr::new(1, 2, 3));
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(bgr_to_hsv(Bgr::RED), HsvPixel::new(0, 255, 255));
        assert_eq!(bgr_to_hsv(Bgr::GREEN), HsvPixel::new(60, 255, 255));
        assert_eq!(bgr_to_hsv(Bgr::BLUE), HsvPixel::new(120, 255, 255));
    }

    #[test]
    fn test_value_is_channel_maximum() {
        for color in [
            Bgr::new(10, 200, 30),
            Bgr::new(90, 40, 91),
            Bgr::new(255, 254, 0),
            Bgr::new(7, 7, 8),
        ] {
            let expected = color.blue.max(color.green).max(color.red);
            assert_eq!(bgr_to_hsv(color).value, expected);
        }
    }

    #[test]
    fn test_black_has_no_saturation() {
        assert_eq!(bgr_to_hsv(Bgr::BLACK), HsvPixel::new(0, 0, 0));
    }

    #[test]
    fn test_gray_round_trip_is_exact() {
        for level in 0..=255u8 {
            let gray = Bgr::gray(level);
            let hsv = bgr_to_hsv(gray);
            assert_eq!(hsv.saturation, 0);
            assert_eq!(hsv.value, level);
            assert_eq!(hsv_to_bgr(hsv), gray);
        }
    }

    #[test]
    fn test_primary_round_trip() {
        for color in [Bgr::RED, Bgr::GREEN, Bgr::BLUE, Bgr::WHITE] {
            assert_eq!(hsv_to_bgr(bgr_to_hsv(color)), color);
        }
    }

    #[test]
    fn test_hue_wraps_below_range() {
        // Magenta-ish reds land near 360 degrees and must wrap into 0..180
        let hsv = bgr_to_hsv(Bgr::new(1, 0, 255));
        assert!(hsv.hue < 180);
    }

    #[test]
    fn test_color_round_trip_close() {
        for color in [
            Bgr::new(30, 120, 200),
            Bgr::new(200, 30, 120),
            Bgr::new(120, 200, 30),
        ] {
            let back = hsv_to_bgr(bgr_to_hsv(color));
            for (a, b) in color.to_bytes().iter().zip(back.to_bytes().iter()) {
                assert!((*a as i32 - *b as i32).abs() <= 3, "{:?} -> {:?}", color, back);
            }
        }
    }

    #[test]
    fn test_luma_gray_preserves_value() {
        for v in [0u8, 64, 128, 192, 255] {
            let luma = luma_u8(Bgr::gray(v));
            assert!((luma as i32 - v as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_luma_primaries() {
        // 0.299 * 255 = 76.2, 0.587 * 255 = 149.7, 0.114 * 255 = 29.1
        assert_eq!(luma_u8(Bgr::RED), 76);
        assert_eq!(luma_u8(Bgr::GREEN), 150);
        assert_eq!(luma_u8(Bgr::BLUE), 29);
    }
}
