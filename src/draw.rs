// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the live camera image with the canvas on top.
// 2) Thick round-capped lines for strokes, previews and the eraser box.
// 3) The hand skeleton overlay for debugging tracking.
// 4) A tiny 5x7 bitmap font to render HUD text on top of the video.

use crate::error::Error;
use crate::landmarks::{Keypoints, HAND_CONNECTIONS};
use crate::types::{FrameBuffer, Point};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window sized to the camera feed.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image (live video).
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True once Q (or ESC) has been pressed; the loop stops on the next check.
    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_pressed(Key::Q, KeyRepeat::No) || self.window.is_key_down(Key::Escape)
    }
}

/* ---------- Software drawing: pixels, lines, boxes, skeleton ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
/// Visual: a straight 1-pixel line appears on top of the image.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Squared distance from (px,py) to the segment a-b.
fn dist2_to_segment(px: f32, py: f32, a: Point, b: Point) -> f32 {
    let (ax, ay) = (a.x as f32, a.y as f32);
    let (bx, by) = (b.x as f32, b.y as f32);
    let (dx, dy) = (bx - ax, by - ay);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 { (((px - ax) * dx + (py - ay) * dy) / len2).clamp(0.0, 1.0) } else { 0.0 };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    (px - cx) * (px - cx) + (py - cy) * (py - cy)
}

/// Draw a line `thickness` pixels wide with round ends.
/// Visual: a solid stroke; a zero-length segment becomes a round dot.
pub fn draw_thick_line(fb: &mut FrameBuffer, from: Point, to: Point, thickness: u32, color: u32) {
    if thickness <= 1 {
        draw_line(fb, from.x, from.y, to.x, to.y, color);
        return;
    }
    let r = thickness as f32 / 2.0;
    let r2 = r * r;
    let pad = r.ceil() as i32;

    // Scan only the stroke's bounding box, clipped to the frame
    let x_lo = from.x.min(to.x).saturating_sub(pad).max(0);
    let y_lo = from.y.min(to.y).saturating_sub(pad).max(0);
    let x_hi = from.x.max(to.x).saturating_add(pad).min(fb.width as i32 - 1);
    let y_hi = from.y.max(to.y).saturating_add(pad).min(fb.height as i32 - 1);

    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            if dist2_to_segment(x as f32, y as f32, from, to) <= r2 {
                put_pixel(fb, x, y, color);
            }
        }
    }
}

/// Draw a rectangle outline with corners `a` and `b`.
/// Visual: a hollow box whose border is `thickness` pixels wide.
pub fn draw_rect(fb: &mut FrameBuffer, a: Point, b: Point, thickness: u32, color: u32) {
    let c = Point::new(b.x, a.y);
    let d = Point::new(a.x, b.y);
    draw_thick_line(fb, a, c, thickness, color);
    draw_thick_line(fb, c, b, thickness, color);
    draw_thick_line(fb, b, d, thickness, color);
    draw_thick_line(fb, d, a, thickness, color);
}

/// Bones of one detected hand.
/// Visual: white stick figure of the hand over the video.
pub fn draw_skeleton(fb: &mut FrameBuffer, kp: &Keypoints) {
    for (a, b) in HAND_CONNECTIONS {
        draw_thick_line(fb, kp.at(a), kp.at(b), 2, 0x00_FF_FF_FF);
    }
}

/// Joint dots and a padded bounding box, for the hand that draws.
/// Visual: magenta dots on every joint inside a green box.
pub fn draw_hand_markers(fb: &mut FrameBuffer, kp: &Keypoints) {
    for p in kp.0 {
        draw_thick_line(fb, p, p, 10, 0x00_FF_00_FF);
    }
    let (min, max) = kp.bounding_box();
    draw_rect(
        fb,
        Point::new(min.x.saturating_sub(20), min.y.saturating_sub(20)),
        Point::new(max.x.saturating_add(20), max.y.saturating_add(20)),
        2,
        0x00_00_FF_00,
    );
}

/* ---------- 5x7 bitmap font (ASCII subset for "DRAW | FPS : 30") ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Uppercase letters for the mode tags and FPS
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),

        // Punctuation: space, vertical bar, colon
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), `scale` screen pixels per font pixel.
/// Visual: a small glyph appears with a black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    // Shadow pass first (offset by one font pixel), then the glyph on top
    for (dx, c) in [(scale, 0x00000000), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) == 0 { continue; }
                let (px, py) = (x + rx * scale + dx, y + ry as i32 * scale + dx);
                for sy in 0..scale {
                    for sx in 0..scale {
                        put_pixel(fb, px + sx, py + sy, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1 font pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, scale: i32, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, scale, color);
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
}
