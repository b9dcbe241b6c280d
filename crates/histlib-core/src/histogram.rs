//! Histogram vectors and accumulation from BGR pixel data.
//!
//! Accumulation uses uniform bins over the 8-bit range `[0, 256)`: a level
//! `v` lands in bin `v * bin_count / 256`.

use crate::buffer::{ColorImage, HsvImage};
use crate::color::luma_u8;

/// Number of 8-bit intensity levels.
pub const LEVELS: usize = 256;

/// Color channel selector for per-channel histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Blue,
    Green,
    Red,
}

impl Channel {
    /// All channels in drawing order.
    pub const ALL: [Channel; 3] = [Channel::Blue, Channel::Green, Channel::Red];

    /// Byte offset of this channel within a BGR pixel.
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Channel::Blue => 0,
            Channel::Green => 1,
            Channel::Red => 2,
        }
    }
}

/// Bin heights in one of the three accepted numeric representations.
#[derive(Debug, Clone, PartialEq)]
pub enum BinValues {
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl BinValues {
    pub fn len(&self) -> usize {
        match self {
            BinValues::I32(v) => v.len(),
            BinValues::F32(v) => v.len(),
            BinValues::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bar height in whole pixels for bin `index`.
    ///
    /// Integers are used as-is; floats round half away from zero.
    /// Returns `None` when `index` is out of range.
    pub fn pixel_height(&self, index: usize) -> Option<i64> {
        match self {
            BinValues::I32(v) => v.get(index).map(|&x| x as i64),
            BinValues::F32(v) => v.get(index).map(|&x| x.round() as i64),
            BinValues::F64(v) => v.get(index).map(|&x| x.round() as i64),
        }
    }
}

/// A one-dimensional histogram with its declared shape.
///
/// Only `1 x n` rows or `n x 1` columns with `n >= 2` are drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramVector {
    rows: usize,
    cols: usize,
    values: BinValues,
}

impl HistogramVector {
    /// A `1 x n` row vector.
    pub fn row(values: BinValues) -> Self {
        Self {
            rows: 1,
            cols: values.len(),
            values,
        }
    }

    /// An `n x 1` column vector.
    pub fn column(values: BinValues) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            values,
        }
    }

    /// An explicitly shaped vector. The shape is validated when drawn.
    pub fn with_shape(rows: usize, cols: usize, values: BinValues) -> Self {
        Self { rows, cols, values }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn values(&self) -> &BinValues {
        &self.values
    }

    /// Bin length when the shape is a drawable 1-D vector, else `None`.
    pub fn bin_len(&self) -> Option<usize> {
        let len = if self.rows > self.cols {
            if self.rows < 2 || self.cols != 1 {
                return None;
            }
            self.rows
        } else {
            if self.rows != 1 || self.cols < 2 {
                return None;
            }
            self.cols
        };

        if self.values.len() != len {
            return None;
        }
        Some(len)
    }
}

impl From<Vec<i32>> for HistogramVector {
    fn from(values: Vec<i32>) -> Self {
        Self::column(BinValues::I32(values))
    }
}

impl From<Vec<f32>> for HistogramVector {
    fn from(values: Vec<f32>) -> Self {
        Self::column(BinValues::F32(values))
    }
}

impl From<Vec<f64>> for HistogramVector {
    fn from(values: Vec<f64>) -> Self {
        Self::column(BinValues::F64(values))
    }
}

#[inline]
fn bin_index(level: u8, bin_count: usize) -> usize {
    level as usize * bin_count / LEVELS
}

/// Count one color channel into `bin_count` uniform bins.
///
/// A `bin_count` of zero yields an empty histogram.
pub fn channel_histogram(image: &ColorImage, channel: Channel, bin_count: usize) -> Vec<u32> {
    let mut bins = vec![0u32; bin_count];
    if bin_count == 0 {
        return bins;
    }

    let offset = channel.offset();
    for chunk in image.as_raw().chunks_exact(3) {
        bins[bin_index(chunk[offset], bin_count)] += 1;
    }
    bins
}

/// Count BT.601 luma levels into `bin_count` uniform bins.
pub fn gray_histogram(image: &ColorImage, bin_count: usize) -> Vec<u32> {
    let mut bins = vec![0u32; bin_count];
    if bin_count == 0 {
        return bins;
    }

    for color in image.pixels() {
        bins[bin_index(luma_u8(color), bin_count)] += 1;
    }
    bins
}

/// Frequency of every 8-bit level in the value channel.
pub fn value_histogram(image: &HsvImage) -> [u32; LEVELS] {
    let mut bins = [0u32; LEVELS];
    for value in image.values() {
        bins[value as usize] += 1;
    }
    bins
}

/// Largest count in a set of bins, zero when empty.
pub fn max_count(bins: &[u32]) -> u32 {
    bins.iter().copied().max().unwrap_or(0)
}

/// Scale counts so that `max` maps to `height` pixels.
///
/// A zero `max` (nothing counted) leaves every bin at zero.
pub fn scale_to_height(bins: &[u32], max: u32, height: u32) -> BinValues {
    if max == 0 {
        return BinValues::F32(vec![0.0; bins.len()]);
    }
    let height = height as f32;
    let max = max as f32;
    BinValues::F32(bins.iter().map(|&count| height * count as f32 / max).collect())
}
