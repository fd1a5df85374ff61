//! 5×7 bitmap glyphs for axis annotation.
//!
//! Covers the characters needed for tick labels and the `R [m]` / `Z [m]`
//! axis titles. Each row holds five pixels; bit 4 is the leftmost column.

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Blank columns between adjacent glyphs.
pub const GLYPH_SPACING: u32 = 1;

type Glyph = [u8; 7];

const BLANK: Glyph = [0; 7];

pub fn glyph(c: char) -> Option<&'static Glyph> {
    let g: &'static Glyph = match c {
        '0' => &[0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => &[0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => &[0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => &[0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => &[0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => &[0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => &[0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => &[0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => &[0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => &[0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => &[0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '-' => &[0x00, 0x00, 0x00, 0x0E, 0x00, 0x00, 0x00],
        '[' => &[0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => &[0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        'R' => &[0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'Z' => &[0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        'm' => &[0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11],
        ' ' => &BLANK,
        _ => return None,
    };
    Some(g)
}

/// Whether pixel (`col`, `row`) of `g` is lit.
pub fn lit(g: &Glyph, col: u32, row: u32) -> bool {
    col < GLYPH_WIDTH && row < GLYPH_HEIGHT && (g[row as usize] >> (GLYPH_WIDTH - 1 - col)) & 1 == 1
}

/// Rendered width in pixels of `text` at integer `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 {
        return 0;
    }
    (n * GLYPH_WIDTH + (n - 1) * GLYPH_SPACING) * scale
}
