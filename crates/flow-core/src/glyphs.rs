//! 5x5 bitmap font used by the pixel-text shape.
//!
//! Each glyph is five rows, top to bottom. Within a row the most significant
//! of the low five bits is the leftmost column.

use crate::constants::{GLYPH_CELL, GLYPH_GAP, GLYPH_SIZE};
use glam::Vec2;

pub type Glyph = [u8; GLYPH_SIZE];

const BLANK: Glyph = [0; GLYPH_SIZE];

/// Look up the bitmap for an already upper-cased character.
pub fn glyph(c: char) -> Option<&'static Glyph> {
    let g: &'static Glyph = match c {
        'A' => &[0b01110, 0b10001, 0b11111, 0b10001, 0b10001],
        'B' => &[0b11110, 0b10001, 0b11110, 0b10001, 0b11110],
        'C' => &[0b01111, 0b10000, 0b10000, 0b10000, 0b01111],
        'D' => &[0b11110, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => &[0b11111, 0b10000, 0b11110, 0b10000, 0b11111],
        'F' => &[0b11111, 0b10000, 0b11110, 0b10000, 0b10000],
        'G' => &[0b01111, 0b10000, 0b10011, 0b10001, 0b01111],
        'H' => &[0b10001, 0b10001, 0b11111, 0b10001, 0b10001],
        'I' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b11111],
        'J' => &[0b00111, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => &[0b10001, 0b10010, 0b11100, 0b10010, 0b10001],
        'L' => &[0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => &[0b10001, 0b11011, 0b10101, 0b10001, 0b10001],
        'N' => &[0b10001, 0b11001, 0b10101, 0b10011, 0b10001],
        'O' => &[0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => &[0b11110, 0b10001, 0b11110, 0b10000, 0b10000],
        'Q' => &[0b01110, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => &[0b11110, 0b10001, 0b11110, 0b10100, 0b10010],
        'S' => &[0b01111, 0b10000, 0b01110, 0b00001, 0b11110],
        'T' => &[0b11111, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => &[0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => &[0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => &[0b10001, 0b10001, 0b10101, 0b11011, 0b10001],
        'X' => &[0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        'Y' => &[0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => &[0b11111, 0b00010, 0b00100, 0b01000, 0b11111],
        '0' => &[0b01110, 0b10011, 0b10101, 0b11001, 0b01110],
        '1' => &[0b00100, 0b01100, 0b00100, 0b00100, 0b01110],
        '2' => &[0b01110, 0b10001, 0b00110, 0b01000, 0b11111],
        '3' => &[0b11110, 0b00001, 0b00110, 0b00001, 0b11110],
        '4' => &[0b10010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => &[0b11111, 0b10000, 0b11110, 0b00001, 0b11110],
        '6' => &[0b01110, 0b10000, 0b11110, 0b10001, 0b01110],
        '7' => &[0b11111, 0b00001, 0b00010, 0b00100, 0b00100],
        '8' => &[0b01110, 0b10001, 0b01110, 0b10001, 0b01110],
        '9' => &[0b01110, 0b10001, 0b01111, 0b00001, 0b01110],
        '?' => &[0b01110, 0b10001, 0b00010, 0b00000, 0b00100],
        '!' => &[0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        ' ' => &BLANK,
        _ => return None,
    };
    Some(g)
}

#[inline]
fn is_lit(g: &Glyph, row: usize, col: usize) -> bool {
    (g[row] >> (GLYPH_SIZE - 1 - col)) & 1 == 1
}

/// Horizontal distance from one glyph's first column to the next glyph's.
#[inline]
pub fn glyph_advance() -> f32 {
    GLYPH_SIZE as f32 * GLYPH_CELL + GLYPH_GAP
}

/// Lit cell centers for `text`, centered on the origin.
///
/// Text is upper-cased first; characters without a glyph advance like a
/// space. The block spanned by all glyph cells (lit or not) is what gets
/// centered, so a string's layout does not shift with its content.
pub fn layout_text(text: &str) -> Vec<Vec2> {
    let upper = text.to_uppercase();
    let span = (GLYPH_SIZE - 1) as f32 * GLYPH_CELL;
    let mut cells = Vec::new();
    let mut glyph_count = 0usize;
    for (i, c) in upper.chars().enumerate() {
        glyph_count += 1;
        let g = glyph(c).unwrap_or(&BLANK);
        let origin_x = i as f32 * glyph_advance();
        for row in 0..GLYPH_SIZE {
            for col in 0..GLYPH_SIZE {
                if is_lit(g, row, col) {
                    cells.push(Vec2::new(
                        origin_x + col as f32 * GLYPH_CELL,
                        (GLYPH_SIZE - 1 - row) as f32 * GLYPH_CELL,
                    ));
                }
            }
        }
    }
    if cells.is_empty() {
        return cells;
    }
    let width = (glyph_count - 1) as f32 * glyph_advance() + span;
    let offset = Vec2::new(width / 2.0, span / 2.0);
    for cell in &mut cells {
        *cell -= offset;
    }
    cells
}
