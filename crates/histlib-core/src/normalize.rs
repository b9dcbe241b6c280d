//! Contrast normalization on the HSV value channel.
//!
//! The value channel is stretched linearly so that a chosen `[min, max]`
//! window maps onto `[0, 255]`. Hue and saturation pass through untouched.
//! The window is either the true extremes of the image or percentile cut
//! points found by scanning the value histogram from both ends.

use crate::buffer::{ColorImage, HsvImage};
use crate::histogram::{value_histogram, LEVELS};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Bounds
// ============================================================================

/// A `(min, max)` remap window with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationBounds {
    min: u8,
    max: u8,
}

impl NormalizationBounds {
    /// Returns `None` for degenerate windows (`max <= min`).
    pub fn new(min: u8, max: u8) -> Option<Self> {
        (min < max).then_some(Self { min, max })
    }

    pub fn min(&self) -> u8 {
        self.min
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// True when the window already spans the full 8-bit range.
    pub fn is_identity(&self) -> bool {
        self.min == 0 && self.max == u8::MAX
    }

    /// Map one value: `(v - min) * 255 / (max - min)`, clamped and rounded.
    #[inline]
    pub fn remap(&self, value: u8) -> u8 {
        let span = (self.max - self.min) as f64;
        let scaled = (value as f64 - self.min as f64) * 255.0 / span;
        scaled.clamp(0.0, 255.0).round() as u8
    }

    /// Pre-computed 256-entry table: `lut[input] = output`.
    pub fn lookup_table(&self) -> [u8; LEVELS] {
        let mut lut = [0u8; LEVELS];
        for (i, lut_value) in lut.iter_mut().enumerate() {
            *lut_value = self.remap(i as u8);
        }
        lut
    }
}

/// True minimum and maximum of the value channel.
///
/// An empty image yields `(255, 0)`, which no window accepts.
pub fn value_bounds(image: &HsvImage) -> (u8, u8) {
    image
        .values()
        .fold((u8::MAX, u8::MIN), |(min, max), v| (min.min(v), max.max(v)))
}

/// Percentile cut points of a 256-level value histogram.
///
/// Half of `clip_percent` of `pixel_count` is trimmed from each end. The
/// lower scan covers levels `1..=254` and the upper scan levels `255..=2`;
/// the upper scan seeds its running sum with level 255 and then adds it
/// again on its first step. When a scan finds no cut point the bound stays
/// at 0 or 255.
pub fn clipped_value_bounds(
    histogram: &[u32; LEVELS],
    pixel_count: usize,
    clip_percent: f64,
) -> (u8, u8) {
    let clip = sanitize_clip_percent(clip_percent);
    let pixels_to_clip = (clip / 100.0 * pixel_count as f64).round() as u64;
    let half_clip = (pixels_to_clip as f64 / 2.0).round() as u64;

    let mut min = 0u8;
    let mut max = u8::MAX;

    if (histogram[0] as u64) < half_clip {
        let mut sum = histogram[0] as u64;
        for (i, &count) in histogram.iter().enumerate().take(255).skip(1) {
            sum += count as u64;
            if sum > half_clip {
                min = i as u8;
                break;
            }
        }
    }

    if (histogram[255] as u64) < half_clip {
        let mut sum = histogram[255] as u64;
        for (i, &count) in histogram.iter().enumerate().skip(2).rev() {
            sum += count as u64;
            if sum > half_clip {
                max = i as u8;
                break;
            }
        }
    }

    (min, max)
}

fn sanitize_clip_percent(clip_percent: f64) -> f64 {
    if clip_percent.is_nan() {
        0.0
    } else {
        clip_percent.clamp(0.0, 100.0)
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Stretch the value channel in place. Hue and saturation are not touched.
pub fn remap_value_channel(image: &mut HsvImage, bounds: NormalizationBounds) {
    if bounds.is_identity() {
        return;
    }

    let lut = bounds.lookup_table();
    for pixel in image.pixels_mut() {
        pixel.value = lut[pixel.value as usize];
    }
}

/// Stretch the value channel between its true extremes.
///
/// A constant value channel (or an empty image) comes back unchanged.
pub fn normalize(source: &ColorImage) -> ColorImage {
    let hsv = HsvImage::from_bgr(source);
    let (min, max) = value_bounds(&hsv);
    apply_bounds(source, hsv, min, max)
}

/// Stretch the value channel between percentile cut points.
///
/// `clip_percent` is clamped to `[0, 100]`; NaN counts as zero.
pub fn normalize_clipped(source: &ColorImage, clip_percent: f64) -> ColorImage {
    let hsv = HsvImage::from_bgr(source);
    let histogram = value_histogram(&hsv);
    let (min, max) = clipped_value_bounds(&histogram, hsv.pixel_count(), clip_percent);
    apply_bounds(source, hsv, min, max)
}

fn apply_bounds(source: &ColorImage, mut hsv: HsvImage, min: u8, max: u8) -> ColorImage {
    let Some(bounds) = NormalizationBounds::new(min, max) else {
        debug!(min, max, "degenerate value range, leaving image unchanged");
        return source.clone();
    };
    if bounds.is_identity() {
        return source.clone();
    }

    debug!(min, max, "stretching value channel");
    remap_value_channel(&mut hsv, bounds);
    hsv.to_bgr()
}

/// Serializable normalization settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContrastNormalizer {
    /// Percentage of pixels to exclude from the bounds, split between
    /// both ends. `None` uses the true extremes.
    pub clip_percent: Option<f64>,
}

impl ContrastNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clipped(clip_percent: f64) -> Self {
        Self {
            clip_percent: Some(clip_percent),
        }
    }

    pub fn apply(&self, source: &ColorImage) -> ColorImage {
        match self.clip_percent {
            Some(clip) => normalize_clipped(source, clip),
            None => normalize(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Bgr, HsvPixel};

    fn gray_row(levels: &[u8]) -> ColorImage {
        let bytes = levels.iter().flat_map(|&l| [l, l, l]).collect();
        ColorImage::from_raw(levels.len() as u32, 1, bytes).unwrap()
    }

    fn levels(image: &ColorImage) -> Vec<u8> {
        image.pixels().map(|p| p.green).collect()
    }

    fn histogram_of(entries: &[(usize, u32)]) -> [u32; LEVELS] {
        let mut hist = [0u32; LEVELS];
        for &(level, count) in entries {
            hist[level] = count;
        }
        hist
    }

    #[test]
    fn test_bounds_require_ordering() {
        assert!(NormalizationBounds::new(10, 10).is_none());
        assert!(NormalizationBounds::new(20, 10).is_none());
        let b = NormalizationBounds::new(0, 255).unwrap();
        assert!(b.is_identity());
        assert_eq!((b.min(), b.max()), (0, 255));
    }

    #[test]
    fn test_remap_endpoints_and_midpoint() {
        let b = NormalizationBounds::new(50, 200).unwrap();
        assert_eq!(b.remap(50), 0);
        assert_eq!(b.remap(200), 255);
        // 75 * 255 / 150 = 127.5 rounds away from zero
        assert_eq!(b.remap(125), 128);
        assert_eq!(b.remap(10), 0);
        assert_eq!(b.remap(250), 255);
    }

    #[test]
    fn test_lookup_table_identity() {
        let lut = NormalizationBounds::new(0, 255).unwrap().lookup_table();
        assert!(lut.iter().enumerate().all(|(i, &v)| v == i as u8));
    }

    #[test]
    fn test_normalize_stretches_range() {
        let img = gray_row(&[50, 125, 200, 80]);
        let out = normalize(&img);
        // 30 * 255 / 150 = 51
        assert_eq!(levels(&out), vec![0, 128, 255, 51]);
        assert!(out.pixels().all(|p| p.blue == p.green && p.green == p.red));
    }

    #[test]
    fn test_normalize_constant_image_unchanged() {
        let img = ColorImage::filled(5, 5, Bgr::new(40, 90, 140));
        assert_eq!(normalize(&img), img);
    }

    #[test]
    fn test_normalize_empty_image() {
        let img = ColorImage::default();
        assert_eq!(normalize(&img), img);
        assert_eq!(normalize_clipped(&img, 5.0), img);
    }

    #[test]
    fn test_normalize_is_idempotent_on_full_range() {
        let all: Vec<u8> = (0..=255).collect();
        let img = gray_row(&all);
        assert_eq!(normalize(&img), img);
    }

    #[test]
    fn test_normalize_twice_is_stable() {
        let mut img = ColorImage::new(3, 1);
        img.put_pixel(0, 0, Bgr::new(20, 60, 100));
        img.put_pixel(1, 0, Bgr::new(180, 30, 40));
        img.put_pixel(2, 0, Bgr::new(70, 70, 70));
        let once = normalize(&img);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_remap_preserves_hue_and_saturation() {
        let mut img = ColorImage::new(2, 1);
        img.put_pixel(0, 0, Bgr::new(20, 60, 100));
        img.put_pixel(1, 0, Bgr::new(180, 30, 40));
        let mut hsv = HsvImage::from_bgr(&img);
        let before: Vec<HsvPixel> = hsv.pixels().to_vec();

        let (min, max) = value_bounds(&hsv);
        assert_eq!((min, max), (100, 180));
        remap_value_channel(&mut hsv, NormalizationBounds::new(min, max).unwrap());

        for (a, b) in before.iter().zip(hsv.pixels()) {
            assert_eq!(a.hue, b.hue);
            assert_eq!(a.saturation, b.saturation);
        }
        assert_eq!(hsv.pixels()[0].value, 0);
        assert_eq!(hsv.pixels()[1].value, 255);
    }

    #[test]
    fn test_value_bounds_empty() {
        let hsv = HsvImage::from_bgr(&ColorImage::default());
        assert_eq!(value_bounds(&hsv), (255, 0));
    }

    #[test]
    fn test_clip_zero_keeps_full_range() {
        let hist = histogram_of(&[(50, 10), (200, 10)]);
        assert_eq!(clipped_value_bounds(&hist, 20, 0.0), (0, 255));
    }

    #[test]
    fn test_clip_zero_matches_normalize_on_full_range_image() {
        let img = gray_row(&[0, 30, 90, 255]);
        assert_eq!(normalize_clipped(&img, 0.0), normalize(&img));
    }

    #[test]
    fn test_clipped_bounds_symmetric_tails() {
        let hist = histogram_of(&[(0, 2), (10, 4), (20, 44), (200, 44), (240, 4), (255, 2)]);
        // 10% of 100 pixels, five from each end
        assert_eq!(clipped_value_bounds(&hist, 100, 10.0), (10, 240));
    }

    #[test]
    fn test_clipped_bounds_dominant_extremes_short_circuit() {
        let hist = histogram_of(&[(0, 10), (128, 80), (255, 10)]);
        assert_eq!(clipped_value_bounds(&hist, 100, 10.0), (0, 255));
    }

    #[test]
    fn test_upper_scan_counts_top_level_twice() {
        // half clip = 3; levels 255 and 254 hold two pixels each
        let hist = histogram_of(&[(100, 56), (254, 2), (255, 2)]);
        assert_eq!(clipped_value_bounds(&hist, 60, 10.0), (100, 255));
    }

    #[test]
    fn test_scan_without_cut_point_defaults_to_extreme() {
        let hist = histogram_of(&[(255, 100)]);
        assert_eq!(clipped_value_bounds(&hist, 100, 10.0), (0, 255));
    }

    #[test]
    fn test_clip_percent_is_clamped() {
        let hist = histogram_of(&[(0, 2), (10, 4), (20, 44), (200, 44), (240, 4), (255, 2)]);
        assert_eq!(
            clipped_value_bounds(&hist, 100, -5.0),
            clipped_value_bounds(&hist, 100, 0.0)
        );
        assert_eq!(
            clipped_value_bounds(&hist, 100, 250.0),
            clipped_value_bounds(&hist, 100, 100.0)
        );
        assert_eq!(clipped_value_bounds(&hist, 100, f64::NAN), (0, 255));
    }

    #[test]
    fn test_normalize_clipped_ignores_outliers() {
        let mut pixels = vec![0u8, 255];
        pixels.extend(std::iter::repeat(100).take(49));
        pixels.extend(std::iter::repeat(150).take(49));
        let img = gray_row(&pixels);

        let out = normalize_clipped(&img, 4.0);
        let out_levels = levels(&out);
        assert_eq!(out_levels[0], 0);
        assert_eq!(out_levels[1], 255);
        assert_eq!(out_levels[2], 0);
        assert_eq!(out_levels[99], 255);
    }

    #[test]
    fn test_normalize_clipped_crossed_bounds_unchanged() {
        let img = gray_row(&[100, 200]);
        let hist = value_histogram(&HsvImage::from_bgr(&img));
        // Both scans overshoot each other, leaving min above max
        assert_eq!(clipped_value_bounds(&hist, 2, 100.0), (200, 100));
        assert_eq!(normalize_clipped(&img, 100.0), img);
    }

    #[test]
    fn test_normalize_clipped_equal_bounds_unchanged() {
        let mut pixels = vec![10u8, 240];
        pixels.extend(std::iter::repeat(128).take(98));
        let img = gray_row(&pixels);
        let hist = value_histogram(&HsvImage::from_bgr(&img));
        // Both scans stop on the dominant level
        assert_eq!(clipped_value_bounds(&hist, 100, 10.0), (128, 128));
        assert_eq!(normalize_clipped(&img, 10.0), img);
    }

    #[test]
    fn test_contrast_normalizer_dispatch() {
        let img = gray_row(&[50, 125, 200]);
        assert_eq!(ContrastNormalizer::new().apply(&img), normalize(&img));
        assert_eq!(
            ContrastNormalizer::clipped(4.0).apply(&img),
            normalize_clipped(&img, 4.0)
        );
    }
}
