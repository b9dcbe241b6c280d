//! Minimal 3x5 digit glyphs for axis labels.
//!
//! Axis labels only ever contain bin indices, so the glyph set is limited
//! to ASCII digits. Unsupported characters advance the cursor blank.

use crate::buffer::ColorImage;
use crate::color::Bgr;

/// Glyph width in pixels.
pub const GLYPH_WIDTH: i64 = 3;

/// Glyph height in pixels.
pub const GLYPH_HEIGHT: i64 = 5;

/// Blank columns between glyphs.
const GLYPH_SPACING: i64 = 1;

/// Rows top to bottom, most significant of the low three bits is the left column.
const DIGITS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

/// Draw `text` with its bottom-left corner at `(x, y)`.
///
/// Pixels falling outside the image are skipped.
pub fn draw_text(image: &mut ColorImage, text: &str, x: i64, y: i64, color: Bgr) {
    let top = y - (GLYPH_HEIGHT - 1);
    let mut cursor = x;

    for ch in text.chars() {
        if let Some(rows) = ch.to_digit(10).map(|d| &DIGITS[d as usize]) {
            for (dy, bits) in rows.iter().enumerate() {
                for dx in 0..GLYPH_WIDTH {
                    if bits & (0b100u8 >> dx) != 0 {
                        put_checked(image, cursor + dx, top + dy as i64, color);
                    }
                }
            }
        }
        cursor += GLYPH_WIDTH + GLYPH_SPACING;
    }
}

#[inline]
fn put_checked(image: &mut ColorImage, x: i64, y: i64, color: Bgr) {
    if x >= 0 && y >= 0 && x < image.width() as i64 && y < image.height() as i64 {
        image.put_pixel(x as u32, y as u32, color);
    }
}
