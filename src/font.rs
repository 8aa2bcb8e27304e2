//! 3x5 bitmap font for the HUD, menus and leaderboard.

use crate::pixel::{PixelBuf, Rgb};

pub const GLYPH_W: i32 = 3;
pub const GLYPH_H: i32 = 5;
/// Glyph width plus one pixel of spacing.
pub const ADVANCE: i32 = 4;

const SHADOW: Rgb = Rgb(30, 30, 30);

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

#[rustfmt::skip]
const LETTERS: [[u8; 15]; 26] = [
    [0,1,0, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // A
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,1,0], // B
    [0,1,1, 1,0,0, 1,0,0, 1,0,0, 0,1,1], // C
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,1,0], // D
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,1,1], // E
    [1,1,1, 1,0,0, 1,1,0, 1,0,0, 1,0,0], // F
    [0,1,1, 1,0,0, 1,0,1, 1,0,1, 0,1,1], // G
    [1,0,1, 1,0,1, 1,1,1, 1,0,1, 1,0,1], // H
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 1,1,1], // I
    [0,0,1, 0,0,1, 0,0,1, 1,0,1, 0,1,0], // J
    [1,0,1, 1,1,0, 1,0,0, 1,1,0, 1,0,1], // K
    [1,0,0, 1,0,0, 1,0,0, 1,0,0, 1,1,1], // L
    [1,1,1, 1,1,1, 1,0,1, 1,0,1, 1,0,1], // M
    [1,1,0, 1,0,1, 1,0,1, 1,0,1, 1,0,1], // N
    [0,1,0, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // O
    [1,1,0, 1,0,1, 1,1,0, 1,0,0, 1,0,0], // P
    [0,1,0, 1,0,1, 1,0,1, 1,1,1, 0,1,1], // Q
    [1,1,0, 1,0,1, 1,1,0, 1,0,1, 1,0,1], // R
    [0,1,1, 1,0,0, 0,1,0, 0,0,1, 1,1,0], // S
    [1,1,1, 0,1,0, 0,1,0, 0,1,0, 0,1,0], // T
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // U
    [1,0,1, 1,0,1, 1,0,1, 1,0,1, 0,1,0], // V
    [1,0,1, 1,0,1, 1,0,1, 1,1,1, 1,1,1], // W
    [1,0,1, 1,0,1, 0,1,0, 1,0,1, 1,0,1], // X
    [1,0,1, 1,0,1, 0,1,0, 0,1,0, 0,1,0], // Y
    [1,1,1, 0,0,1, 0,1,0, 1,0,0, 1,1,1], // Z
];

#[rustfmt::skip]
const DASH: [u8; 15] = [0,0,0, 0,0,0, 1,1,1, 0,0,0, 0,0,0];
#[rustfmt::skip]
const DOT: [u8; 15] = [0,0,0, 0,0,0, 0,0,0, 0,0,0, 0,1,0];
#[rustfmt::skip]
const UNDERSCORE: [u8; 15] = [0,0,0, 0,0,0, 0,0,0, 0,0,0, 1,1,1];

fn glyph(c: char) -> Option<&'static [u8; 15]> {
    match c {
        '0'..='9' => Some(&DIGITS[c as usize - '0' as usize]),
        'A'..='Z' => Some(&LETTERS[c as usize - 'A' as usize]),
        'a'..='z' => Some(&LETTERS[c as usize - 'a' as usize]),
        '-' => Some(&DASH),
        '.' => Some(&DOT),
        '_' => Some(&UNDERSCORE),
        _ => None,
    }
}

/// Draw one glyph at pixel scale `scale`, with a one-pixel drop shadow.
pub fn draw_char(buf: &mut PixelBuf, x: i32, y: i32, c: char, fg: Rgb, scale: i32) {
    let Some(bits) = glyph(c) else {
        return;
    };
    for row in 0..5 {
        for col in 0..3 {
            if bits[(row * 3 + col) as usize] == 1 {
                let px = x + col * scale;
                let py = y + row * scale;
                buf.fill_rect(px + 1, py + 1, scale, scale, SHADOW);
                buf.fill_rect(px, py, scale, scale, fg);
            }
        }
    }
}

pub fn text_width(s: &str, scale: i32) -> i32 {
    s.chars().count() as i32 * ADVANCE * scale - scale
}

/// Left-aligned text; unknown characters (including space) advance silently.
pub fn draw_text(buf: &mut PixelBuf, x: i32, y: i32, s: &str, fg: Rgb, scale: i32) {
    for (i, c) in s.chars().enumerate() {
        draw_char(buf, x + i as i32 * ADVANCE * scale, y, c, fg, scale);
    }
}

pub fn draw_text_centered(buf: &mut PixelBuf, cx: i32, y: i32, s: &str, fg: Rgb, scale: i32) {
    draw_text(buf, cx - text_width(s, scale) / 2, y, s, fg, scale);
}

/// Centered decimal number, used for the score HUD.
pub fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, fg: Rgb) {
    draw_text_centered(buf, cx, y, &n.to_string(), fg, 1);
}
