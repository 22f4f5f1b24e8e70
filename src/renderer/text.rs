//! Bitmap font text for corner labels and score values.
//!
//! Text is drawn with an 8×8 bitmap font scaled to the configured pixel
//! size, horizontally centered on the (animated) corner position plus a
//! per-quadrant margin.

use crate::color::Rgba;
use crate::geometry::Point;

use super::Canvas;

/// Per-quadrant label offsets. Four entries, indexed by corner % 4; a
/// chart with more corners cycles through them.
const LABEL_MARGINS: [(i32, i32); 4] = [(30, 5), (0, -10), (-30, 5), (0, 25)];

/// Score offsets push the value text further out than the label.
const SCORE_MARGINS: [(i32, i32); 4] = [(30, -25), (0, -40), (-30, -25), (0, 70)];

const GLYPH_SIZE: usize = 8;

/// Draw a corner label centered at the corner position plus its margin.
pub fn draw_label(
    canvas: &mut Canvas,
    label: &str,
    pos: Point,
    corner: usize,
    color: Rgba,
    size_px: u32,
) {
    let (mx, my) = LABEL_MARGINS[corner % 4];
    draw_centered(
        canvas,
        label,
        pos.x + f64::from(mx),
        pos.y + f64::from(my),
        color,
        scale_for(size_px),
    );
}

/// Draw the raw value next to a corner, in the accent color and the
/// larger score font.
pub fn draw_score(
    canvas: &mut Canvas,
    value: f64,
    pos: Point,
    corner: usize,
    color: Rgba,
    size_px: u32,
) {
    let (mx, my) = SCORE_MARGINS[corner % 4];
    draw_centered(
        canvas,
        &format_value(value),
        pos.x + f64::from(mx),
        pos.y + f64::from(my),
        color,
        scale_for(size_px),
    );
}

/// Integral values print without a decimal point, the way raw numbers do.
pub(super) fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Glyphs are 8px tall; a 26px label rounds to 3x, a 46px score to 6x.
fn scale_for(size_px: u32) -> usize {
    ((size_px as f32) / GLYPH_SIZE as f32).round().max(1.0) as usize
}

/// Draw text horizontally centered at `x` with the baseline at `y`.
fn draw_centered(canvas: &mut Canvas, text: &str, x: f64, y: f64, color: Rgba, scale: usize) {
    let count = text.chars().count();
    if count == 0 {
        return;
    }
    let char_width = GLYPH_SIZE * scale;
    let spacing = scale;
    let text_width = count * char_width + (count - 1) * spacing;
    let start_x = (x - text_width as f64 / 2.0).round() as i32;
    let top_y = (y - (GLYPH_SIZE * scale) as f64).round() as i32;

    for (i, ch) in text.chars().enumerate() {
        let cx = start_x + (i * (char_width + spacing)) as i32;
        render_char(canvas, cx, top_y, ch, color, scale);
    }
}

fn render_char(canvas: &mut Canvas, x: i32, y: i32, ch: char, color: Rgba, scale: usize) {
    let bitmap = match get_char_bitmap(ch) {
        Some(b) => b,
        None => return,
    };

    for (row_idx, &row) in bitmap.iter().enumerate() {
        for col in 0..8 {
            if (row >> (7 - col)) & 1 == 1 {
                for sy in 0..scale {
                    for sx in 0..scale {
                        let px = x + (col * scale + sx) as i32;
                        let py = y + (row_idx * scale + sy) as i32;
                        canvas.put_pixel(px, py, color);
                    }
                }
            }
        }
    }
}

/// Simple 8x8 bitmap font for basic text rendering.
/// Each character is represented as 8 bytes, one per row.
fn get_char_bitmap(ch: char) -> Option<[u8; 8]> {
    let ch = ch.to_ascii_uppercase();
    Some(match ch {
        'A' => [0x18, 0x24, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x00],
        'B' => [0x7C, 0x42, 0x7C, 0x42, 0x42, 0x42, 0x7C, 0x00],
        'C' => [0x3C, 0x42, 0x40, 0x40, 0x40, 0x42, 0x3C, 0x00],
        'D' => [0x78, 0x44, 0x42, 0x42, 0x42, 0x44, 0x78, 0x00],
        'E' => [0x7E, 0x40, 0x7C, 0x40, 0x40, 0x40, 0x7E, 0x00],
        'F' => [0x7E, 0x40, 0x7C, 0x40, 0x40, 0x40, 0x40, 0x00],
        'G' => [0x3C, 0x42, 0x40, 0x4E, 0x42, 0x42, 0x3C, 0x00],
        'H' => [0x42, 0x42, 0x7E, 0x42, 0x42, 0x42, 0x42, 0x00],
        'I' => [0x3E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x3E, 0x00],
        'J' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x44, 0x38, 0x00],
        'K' => [0x42, 0x44, 0x78, 0x48, 0x44, 0x42, 0x42, 0x00],
        'L' => [0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x7E, 0x00],
        'M' => [0x42, 0x66, 0x5A, 0x42, 0x42, 0x42, 0x42, 0x00],
        'N' => [0x42, 0x62, 0x52, 0x4A, 0x46, 0x42, 0x42, 0x00],
        'O' => [0x3C, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00],
        'P' => [0x7C, 0x42, 0x42, 0x7C, 0x40, 0x40, 0x40, 0x00],
        'Q' => [0x3C, 0x42, 0x42, 0x42, 0x4A, 0x44, 0x3A, 0x00],
        'R' => [0x7C, 0x42, 0x42, 0x7C, 0x48, 0x44, 0x42, 0x00],
        'S' => [0x3C, 0x42, 0x30, 0x0C, 0x02, 0x42, 0x3C, 0x00],
        'T' => [0x7F, 0x08, 0x08, 0x08, 0x08, 0x08, 0x08, 0x00],
        'U' => [0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x3C, 0x00],
        'V' => [0x42, 0x42, 0x42, 0x42, 0x24, 0x24, 0x18, 0x00],
        'W' => [0x42, 0x42, 0x42, 0x5A, 0x5A, 0x66, 0x42, 0x00],
        'X' => [0x42, 0x24, 0x18, 0x18, 0x24, 0x42, 0x42, 0x00],
        'Y' => [0x41, 0x22, 0x14, 0x08, 0x08, 0x08, 0x08, 0x00],
        'Z' => [0x7E, 0x04, 0x08, 0x10, 0x20, 0x40, 0x7E, 0x00],
        '0' => [0x3C, 0x42, 0x46, 0x5A, 0x62, 0x42, 0x3C, 0x00],
        '1' => [0x08, 0x18, 0x28, 0x08, 0x08, 0x08, 0x3E, 0x00],
        '2' => [0x3C, 0x42, 0x02, 0x0C, 0x30, 0x40, 0x7E, 0x00],
        '3' => [0x3C, 0x42, 0x02, 0x1C, 0x02, 0x42, 0x3C, 0x00],
        '4' => [0x04, 0x0C, 0x14, 0x24, 0x7E, 0x04, 0x04, 0x00],
        '5' => [0x7E, 0x40, 0x7C, 0x02, 0x02, 0x42, 0x3C, 0x00],
        '6' => [0x1C, 0x20, 0x40, 0x7C, 0x42, 0x42, 0x3C, 0x00],
        '7' => [0x7E, 0x02, 0x04, 0x08, 0x10, 0x10, 0x10, 0x00],
        '8' => [0x3C, 0x42, 0x42, 0x3C, 0x42, 0x42, 0x3C, 0x00],
        '9' => [0x3C, 0x42, 0x42, 0x3E, 0x02, 0x04, 0x38, 0x00],
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x08, 0x10],
        '!' => [0x08, 0x08, 0x08, 0x08, 0x08, 0x00, 0x08, 0x00],
        '?' => [0x3C, 0x42, 0x02, 0x0C, 0x10, 0x00, 0x10, 0x00],
        ':' => [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00],
        '\'' => [0x08, 0x08, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00],
        '"' => [0x24, 0x24, 0x48, 0x00, 0x00, 0x00, 0x00, 0x00],
        '(' => [0x04, 0x08, 0x10, 0x10, 0x10, 0x08, 0x04, 0x00],
        ')' => [0x20, 0x10, 0x08, 0x08, 0x08, 0x10, 0x20, 0x00],
        '%' => [0x62, 0x64, 0x08, 0x10, 0x26, 0x46, 0x00, 0x00],
        '/' => [0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x00, 0x00],
        '&' => [0x30, 0x48, 0x30, 0x50, 0x4A, 0x44, 0x3A, 0x00],
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(80.0), "80");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(80.5), "80.5");
        assert_eq!(format_value(-7.0), "-7");
    }

    #[test]
    fn test_margins_cycle_modulo_four() {
        assert_eq!(LABEL_MARGINS[0], (30, 5));
        assert_eq!(LABEL_MARGINS[5 % 4], (0, -10));
        assert_eq!(SCORE_MARGINS[7 % 4], (0, 70));
    }

    #[test]
    fn test_font_scales() {
        assert_eq!(scale_for(26), 3);
        assert_eq!(scale_for(46), 6);
        assert_eq!(scale_for(1), 1);
    }

    #[test]
    fn test_draw_label_paints_pixels() {
        let mut canvas = Canvas::new(120, 120);
        draw_label(
            &mut canvas,
            "A",
            Point::new(60.0, 60.0),
            1,
            Rgba::opaque(0, 0, 0),
            26,
        );
        assert!(canvas.data.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_unknown_glyphs_are_skipped() {
        let mut canvas = Canvas::new(64, 64);
        draw_label(
            &mut canvas,
            "€",
            Point::new(32.0, 32.0),
            0,
            Rgba::opaque(0, 0, 0),
            26,
        );
        assert!(canvas.data.iter().all(|&b| b == 0));
    }
}
