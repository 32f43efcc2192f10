// One tick of air writing: hands in, finished screen image out.
// Visual expectation: ink where you drew, a fat preview under your finger while
// drawing, a white box between index and middle tips while erasing.

use crate::canvas::{composite_in_place, Canvas};
use crate::draw::{draw_hand_markers, draw_rect, draw_skeleton, draw_thick_line};
use crate::error::Error;
use crate::gesture::classify;
use crate::landmarks::{find_hand, Hand, Handedness};
use crate::pen::{Brushes, Mode, Overlay, Pen};
use crate::types::FrameBuffer;

const ERASER_BOX_COLOR: u32 = 0x00_FF_FF_FF;

pub struct AirWriter {
    canvas: Canvas,
    pen: Pen,
    mode: Mode,
    brushes: Brushes,
    hand: Handedness,
    debug_overlay: bool,
}

impl AirWriter {
    pub fn new(width: usize, height: usize, brushes: Brushes, hand: Handedness, debug_overlay: bool) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            pen: Pen::default(),
            mode: Mode::Idle,
            brushes,
            hand,
            debug_overlay,
        }
    }

    #[cfg(test)]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Update pen and canvas from this tick's hands, then draw everything onto `frame`.
    ///
    /// `frame` becomes the image to show. The canvas is only touched by
    /// strokes; previews and boxes land on `frame` alone.
    pub fn tick(&mut self, frame: &mut FrameBuffer, hands: &[Hand]) -> Result<Mode, Error> {
        // Check sizes before touching any state so a bad frame leaves the session intact.
        if !frame.same_size(self.canvas.pixels()) {
            return Err(Error::SizeMismatch(format!(
                "frame {}x{} vs canvas {}x{}",
                frame.width,
                frame.height,
                self.canvas.pixels().width,
                self.canvas.pixels().height
            )));
        }

        if self.debug_overlay {
            for hand in hands {
                draw_skeleton(frame, &hand.keypoints);
            }
            if let Some(hand) = find_hand(hands, self.hand) {
                draw_hand_markers(frame, &hand.keypoints);
            }
        }

        let step = self.pen.step(classify(hands, self.hand), &self.brushes);
        if step.mode != self.mode {
            log::debug!("{} -> {}", self.mode.label(), step.mode.label());
        }
        self.pen = step.pen;
        self.mode = step.mode;

        match step.overlay {
            Some(Overlay::Preview(s)) => draw_thick_line(frame, s.from, s.to, s.thickness, s.color),
            Some(Overlay::EraserBox { span, thickness }) => {
                log::trace!("eraser at ({}, {}), tips {:.0}px apart", span.mid.x, span.mid.y, span.length);
                draw_rect(frame, span.from, span.to, thickness, ERASER_BOX_COLOR)
            }
            None => {}
        }
        if let Some(stroke) = step.stroke {
            self.canvas.apply(&stroke);
        }

        composite_in_place(frame, &self.canvas)?;
        Ok(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::tests::fold;
    use crate::landmarks::tests::open_hand;
    use crate::landmarks::{idx, Keypoints};
    use crate::types::Point;

    const W: usize = 320;
    const H: usize = 240;

    fn writer() -> AirWriter {
        AirWriter::new(W, H, Brushes::default(), Handedness::Right, false)
    }

    fn right(kp: Keypoints) -> Vec<Hand> {
        vec![Hand { handedness: Handedness::Right, keypoints: kp }]
    }

    /// Index up only, tip at `at`; thumb tucked.
    fn pointing(at: Point) -> Keypoints {
        let mut kp = open_hand();
        kp.0[idx::THUMB_TIP] = Point::new(200, 240);
        fold(&mut kp, idx::MIDDLE_TIP);
        fold(&mut kp, idx::RING_TIP);
        fold(&mut kp, idx::PINKY_TIP);
        kp.0[idx::INDEX_PIP] = Point::new(at.x, at.y + 40);
        kp.0[idx::INDEX_TIP] = at;
        kp
    }

    /// Index, middle and ring up, thumb out, pinky down.
    fn erasing(index: Point, middle: Point) -> Keypoints {
        let mut kp = open_hand();
        fold(&mut kp, idx::PINKY_TIP);
        kp.0[idx::INDEX_PIP] = Point::new(index.x, index.y + 40);
        kp.0[idx::INDEX_TIP] = index;
        kp.0[idx::MIDDLE_PIP] = Point::new(middle.x, middle.y + 40);
        kp.0[idx::MIDDLE_TIP] = middle;
        kp
    }

    fn fist() -> Keypoints {
        let mut kp = open_hand();
        kp.0[idx::THUMB_TIP] = Point::new(200, 240);
        for tip in [idx::INDEX_TIP, idx::MIDDLE_TIP, idx::RING_TIP, idx::PINKY_TIP] {
            fold(&mut kp, tip);
        }
        kp
    }

    fn ink_at(w: &AirWriter, x: i32, y: i32) -> u32 {
        w.canvas().pixels().get(x, y).unwrap()
    }

    fn canvas_is_blank(w: &AirWriter) -> bool {
        w.canvas().pixels().pixels.iter().all(|&p| p == 0)
    }

    #[test]
    fn first_draw_tick_leaves_canvas_blank() {
        let mut w = writer();
        let mut frame = FrameBuffer::blank(W, H);
        let mode = w.tick(&mut frame, &right(pointing(Point::new(100, 100)))).unwrap();
        assert_eq!(mode, Mode::Draw);
        assert!(canvas_is_blank(&w));
        // but the preview dot shows on screen
        assert_eq!(frame.get(100, 100), Some(Brushes::default().brush_color));
    }

    #[test]
    fn draw_then_erase_scenario() {
        let b = Brushes::default();
        let mut w = writer();
        let mut frame = FrameBuffer::blank(W, H);

        w.tick(&mut frame, &right(pointing(Point::new(100, 100)))).unwrap();
        w.tick(&mut frame, &right(pointing(Point::new(120, 100)))).unwrap();
        for x in 100..=120 {
            assert_eq!(ink_at(&w, x, 100), b.brush_color, "x={x}");
        }
        assert_eq!(ink_at(&w, 110, 107), b.brush_color);
        assert_eq!(ink_at(&w, 110, 108), 0);

        let mut frame = FrameBuffer::blank(W, H);
        let mode = w
            .tick(&mut frame, &right(erasing(Point::new(130, 100), Point::new(140, 100))))
            .unwrap();
        assert_eq!(mode, Mode::Erase);
        // Eraser segment (120,100)->(130,100), 50 wide: wipes the tail of the stroke.
        assert_eq!(ink_at(&w, 120, 100), b.eraser_color);
        assert_eq!(ink_at(&w, 100, 100), b.eraser_color); // 20px from the start, inside the 25px radius
        // The brush stroke's round cap at x=93 is beyond the eraser's reach (27px from (120,100)).
        assert_eq!(ink_at(&w, 93, 100), b.brush_color);
        // Eraser box is frame-only and white.
        assert_eq!(frame.get(130, 100), Some(0x00_FF_FF_FF));
        assert_eq!(ink_at(&w, 130, 130), 0);
    }

    #[test]
    fn idle_breaks_the_stroke() {
        let mut w = writer();
        let mut frame = FrameBuffer::blank(W, H);
        w.tick(&mut frame, &right(pointing(Point::new(50, 50)))).unwrap();
        w.tick(&mut frame, &right(pointing(Point::new(60, 50)))).unwrap();
        assert_eq!(w.tick(&mut frame, &right(fist())).unwrap(), Mode::Idle);
        w.tick(&mut frame, &right(pointing(Point::new(250, 200)))).unwrap();
        // Nothing joins (60,50) to (250,200).
        assert_eq!(ink_at(&w, 155, 125), 0);
        assert_eq!(ink_at(&w, 250, 200), 0);
    }

    #[test]
    fn other_hand_is_ignored() {
        let mut w = writer();
        let mut frame = FrameBuffer::blank(W, H);
        let left = vec![Hand { handedness: Handedness::Left, keypoints: pointing(Point::new(10, 10)) }];
        assert_eq!(w.tick(&mut frame, &left).unwrap(), Mode::Idle);
        assert_eq!(w.tick(&mut frame, &[]).unwrap(), Mode::Idle);
        assert!(canvas_is_blank(&w));
    }

    #[test]
    fn ink_survives_later_frames() {
        let mut w = writer();
        let mut frame = FrameBuffer::blank(W, H);
        w.tick(&mut frame, &right(pointing(Point::new(20, 20)))).unwrap();
        w.tick(&mut frame, &right(pointing(Point::new(40, 20)))).unwrap();

        let mut fresh = FrameBuffer { width: W, height: H, pixels: vec![0x00_20_40_60; W * H] };
        w.tick(&mut fresh, &[]).unwrap();
        assert_eq!(fresh.get(30, 20), Some(Brushes::default().brush_color));
        assert_eq!(fresh.get(300, 200), Some(0x00_20_40_60));
    }

    #[test]
    fn wrong_sized_frame_fails_without_touching_state() {
        let mut w = writer();
        let mut frame = FrameBuffer::blank(W, H);
        w.tick(&mut frame, &right(pointing(Point::new(20, 20)))).unwrap();

        let mut small = FrameBuffer::blank(10, 10);
        assert!(w.tick(&mut small, &right(pointing(Point::new(5, 5)))).is_err());

        // Pen still remembers (20,20), so the next tick draws from there.
        w.tick(&mut frame, &right(pointing(Point::new(40, 20)))).unwrap();
        assert_eq!(ink_at(&w, 30, 20), Brushes::default().brush_color);
    }

    #[test]
    fn debug_overlay_draws_skeleton_on_frame_only() {
        let mut w = AirWriter::new(W, H, Brushes::default(), Handedness::Right, true);
        let mut frame = FrameBuffer::blank(W, H);
        w.tick(&mut frame, &right(fist())).unwrap();
        assert!(frame.pixels.iter().any(|&p| p == 0x00_00_FF_00));
        assert!(canvas_is_blank(&w));
    }

    #[test]
    fn debug_overlay_skeletons_every_hand_but_boxes_only_the_tracked_one() {
        let mut w = AirWriter::new(W, H, Brushes::default(), Handedness::Right, true);

        // Only the other hand in view: bones but no box.
        let mut frame = FrameBuffer::blank(W, H);
        let left = vec![Hand { handedness: Handedness::Left, keypoints: fist() }];
        w.tick(&mut frame, &left).unwrap();
        assert_eq!(frame.get(180, 210), Some(0x00_FF_FF_FF)); // index finger bone
        assert!(!frame.pixels.contains(&0x00_00_FF_00));

        // Both hands: the tracked one adds the box.
        let mut frame = FrameBuffer::blank(W, H);
        let both = vec![left[0].clone(), Hand { handedness: Handedness::Right, keypoints: fist() }];
        w.tick(&mut frame, &both).unwrap();
        assert!(frame.pixels.contains(&0x00_00_FF_00));
    }
}
