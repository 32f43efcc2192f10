// The persistent ink layer and how it gets stamped over the live video.
// Visual expectation: strokes stay where you drew them while the camera image
// keeps moving underneath.

use crate::draw::draw_thick_line;
use crate::error::Error;
use crate::pen::Stroke;
use crate::types::{channels, FrameBuffer};

/// Canvas pixels at or below this luma count as empty.
pub const INK_THRESHOLD: u8 = 50;

/// Accumulates strokes for the whole session; starts (and only ever starts) all-zero.
pub struct Canvas {
    ink: FrameBuffer,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { ink: FrameBuffer::blank(width, height) }
    }

    pub fn pixels(&self) -> &FrameBuffer {
        &self.ink
    }

    /// Paint one segment. Erasing is just painting in the background color.
    pub fn apply(&mut self, stroke: &Stroke) {
        draw_thick_line(&mut self.ink, stroke.from, stroke.to, stroke.thickness, stroke.color);
    }
}

/// Fixed-point luma with the usual 0.299/0.587/0.114 weights.
#[inline]
fn luma(px: u32) -> u8 {
    let (r, g, b) = channels(px);
    ((r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868 + (1 << 13)) >> 14) as u8
}

/// Stamp canvas ink over `frame` in place.
///
/// Where the canvas is bright enough to count as ink the frame pixel is cut
/// out; the canvas is then OR-ed on top. Binary mask, no alpha: ink replaces
/// the video outright and everything else passes through untouched.
pub fn composite_in_place(frame: &mut FrameBuffer, canvas: &Canvas) -> Result<(), Error> {
    let ink = canvas.pixels();
    if !frame.same_size(ink) {
        return Err(Error::SizeMismatch(format!(
            "composite: frame {}x{} vs canvas {}x{}",
            frame.width, frame.height, ink.width, ink.height
        )));
    }

    for (f, &c) in frame.pixels.iter_mut().zip(ink.pixels.iter()) {
        let keep: u32 = if luma(c) > INK_THRESHOLD { 0 } else { 0x00_FF_FF_FF };
        *f = (*f & keep) | c;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{rgb, Point};

    fn camera_frame(w: usize, h: usize) -> FrameBuffer {
        // Distinct, non-trivial pixels so pass-through is actually checked.
        let pixels = (0..w * h).map(|i| rgb((i % 251) as u8, (i * 7 % 253) as u8, (i * 13 % 241) as u8)).collect();
        FrameBuffer { width: w, height: h, pixels }
    }

    #[test]
    fn empty_canvas_leaves_frame_untouched() {
        let raw = camera_frame(64, 48);
        let mut shown = raw.clone();
        composite_in_place(&mut shown, &Canvas::new(64, 48)).unwrap();
        assert_eq!(shown, raw);
    }

    #[test]
    fn solid_region_replaces_exactly_that_region() {
        let raw = camera_frame(40, 30);
        let mut canvas = Canvas::new(40, 30);
        let magenta = rgb(255, 0, 255);
        for y in 10..20 {
            for x in 5..15 {
                canvas.ink.pixels[y * 40 + x] = magenta;
            }
        }

        let mut shown = raw.clone();
        composite_in_place(&mut shown, &canvas).unwrap();
        for y in 0..30 {
            for x in 0..40 {
                let i = y * 40 + x;
                if (10..20).contains(&y) && (5..15).contains(&x) {
                    assert_eq!(shown.pixels[i], magenta, "({x},{y})");
                } else {
                    assert_eq!(shown.pixels[i], raw.pixels[i], "({x},{y})");
                }
            }
        }
    }

    #[test]
    fn dim_ink_is_ored_not_cut() {
        // Pure blue is below the luma threshold, so the frame shows through with blue OR-ed in.
        let mut canvas = Canvas::new(1, 1);
        canvas.ink.pixels[0] = rgb(0, 0, 200);
        let mut shown = FrameBuffer { width: 1, height: 1, pixels: vec![rgb(10, 20, 30)] };
        composite_in_place(&mut shown, &canvas).unwrap();
        assert_eq!(shown.pixels[0], rgb(10, 20, 30 | 200));
    }

    #[test]
    fn luma_matches_reference_weights() {
        assert_eq!(luma(rgb(255, 255, 255)), 255);
        assert_eq!(luma(rgb(0, 0, 0)), 0);
        assert_eq!(luma(rgb(255, 0, 255)), 105);
    }

    #[test]
    fn erasing_restores_pass_through() {
        let raw = camera_frame(60, 20);
        let mut canvas = Canvas::new(60, 20);
        let brush = Stroke { from: Point::new(10, 10), to: Point::new(50, 10), color: rgb(255, 0, 255), thickness: 5 };
        canvas.apply(&brush);
        canvas.apply(&Stroke { color: 0, thickness: 9, ..brush });
        assert!(canvas.pixels().pixels.iter().all(|&p| p == 0));

        let mut shown = raw.clone();
        composite_in_place(&mut shown, &canvas).unwrap();
        assert_eq!(shown, raw);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let mut shown = FrameBuffer::blank(10, 10);
        let err = composite_in_place(&mut shown, &Canvas::new(10, 11)).unwrap_err();
        assert!(matches!(err, Error::SizeMismatch(_)));
    }
}
