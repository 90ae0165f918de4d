//! Frame annotations: detection outline and decoded-text banner

use crate::models::Point;
use crate::models::point::closed_edges;
use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Rgb, RgbImage};

/// Outline color, green
pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Outline width in pixels
pub const OUTLINE_THICKNESS: i32 = 2;
/// Banner text color, magenta
pub const TEXT_COLOR: Rgb<u8> = Rgb([255, 0, 255]);
/// Left end of the text baseline
pub const TEXT_ORIGIN: Point = Point { x: 10, y: 30 };
/// Each font pixel becomes a `TEXT_SCALE`-sided square
pub const TEXT_SCALE: i32 = 2;

const GLYPH: i32 = 8;

fn put(frame: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < frame.width() && (y as u32) < frame.height() {
        frame.put_pixel(x as u32, y as u32, color);
    }
}

fn stamp(frame: &mut RgbImage, x: i32, y: i32, side: i32, color: Rgb<u8>) {
    for dy in 0..side {
        for dx in 0..side {
            put(frame, x + dx, y + dy, color);
        }
    }
}

/// Bresenham line with a square pen of side `thickness`; clipped to the frame.
pub fn draw_line(frame: &mut RgbImage, from: Point, to: Point, thickness: i32, color: Rgb<u8>) {
    let (dx, dy) = ((to.x - from.x).abs(), -(to.y - from.y).abs());
    let (sx, sy) = (
        if from.x < to.x { 1 } else { -1 },
        if from.y < to.y { 1 } else { -1 },
    );
    let offset = thickness / 2;
    let (mut x, mut y) = (from.x, from.y);
    let mut err = dx + dy;
    loop {
        stamp(frame, x - offset, y - offset, thickness.max(1), color);
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Outline of a closed polygon
pub fn draw_polygon(frame: &mut RgbImage, polygon: &[Point]) {
    for (a, b) in closed_edges(polygon) {
        draw_line(frame, a, b, OUTLINE_THICKNESS, OUTLINE_COLOR);
    }
}

/// Draw `text` with its baseline starting at `origin`. Characters without a
/// glyph render as `?`.
pub fn draw_text(frame: &mut RgbImage, text: &str, origin: Point, color: Rgb<u8>) {
    let top = origin.y - GLYPH * TEXT_SCALE;
    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            continue;
        };
        let left = origin.x + i as i32 * GLYPH * TEXT_SCALE;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..GLYPH {
                if bits & (1 << col) != 0 {
                    stamp(
                        frame,
                        left + col * TEXT_SCALE,
                        top + row as i32 * TEXT_SCALE,
                        TEXT_SCALE,
                        color,
                    );
                }
            }
        }
    }
}

/// The `Data: <payload>` banner shown while a payload is fresh
pub fn draw_payload(frame: &mut RgbImage, payload: &str) {
    draw_text(frame, &format!("Data: {payload}"), TEXT_ORIGIN, TEXT_COLOR);
}
