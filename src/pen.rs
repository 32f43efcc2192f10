// Draw / Erase / Idle selection and the pen that strings fingertip positions into segments.
// Everything here is pure: a tick goes in, the new pen and what to paint come out.

use crate::gesture::Gesture;
use crate::landmarks::{idx, Keypoints, Span};
use crate::types::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Draw,
    Erase,
}

impl Mode {
    /// Only the index finger up draws (thumb ignored); index, middle and ring up erases
    /// (pinky ignored); anything else rests.
    pub fn select(g: &Gesture) -> Self {
        if g.index() && !g.middle() && !g.ring() && !g.pinky() {
            Mode::Draw
        } else if g.index() && g.middle() && g.ring() {
            Mode::Erase
        } else {
            Mode::Idle
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Idle => "IDLE",
            Mode::Draw => "DRAW",
            Mode::Erase => "ERASE",
        }
    }
}

/// Colors and widths for the two painting modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brushes {
    pub brush_color: u32,
    pub brush_thickness: u32,
    pub eraser_color: u32,
    pub eraser_thickness: u32,
}

impl Default for Brushes {
    fn default() -> Self {
        Self {
            brush_color: 0x00_FF_00_FF,
            brush_thickness: 15,
            eraser_color: 0x00_00_00_00,
            eraser_thickness: 50,
        }
    }
}

/// One straight segment to paint into the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stroke {
    pub from: Point,
    pub to: Point,
    pub color: u32,
    pub thickness: u32,
}

/// Feedback painted on the displayed frame only; never reaches the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overlay {
    /// Fat line under the drawing fingertip.
    Preview(Stroke),
    /// Box spanning index and middle fingertips while erasing.
    EraserBox { span: Span, thickness: u32 },
}

/// Where the index fingertip was last tick; `None` means no stroke is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pen {
    last: Option<Point>,
}

/// Outcome of one tick of the machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub pen: Pen,
    pub mode: Mode,
    pub stroke: Option<Stroke>,
    pub overlay: Option<Overlay>,
}

impl Pen {
    /// Advance one tick. `reading` is None when the tracked hand is not in view.
    ///
    /// The first Draw/Erase tick after a rest only records the fingertip, so a
    /// stroke never starts with a line from some stale point.
    pub fn step(self, reading: Option<(Gesture, &Keypoints)>, brushes: &Brushes) -> Step {
        let Some((gesture, kp)) = reading else {
            return Step { pen: Pen::default(), mode: Mode::Idle, stroke: None, overlay: None };
        };

        let mode = Mode::select(&gesture);
        let tip = kp.at(idx::INDEX_TIP);
        let (color, thickness) = match mode {
            Mode::Idle => {
                return Step { pen: Pen::default(), mode, stroke: None, overlay: None };
            }
            Mode::Draw => (brushes.brush_color, brushes.brush_thickness),
            Mode::Erase => (brushes.eraser_color, brushes.eraser_thickness),
        };

        let stroke = self.last.map(|from| Stroke { from, to: tip, color, thickness });
        let overlay = match mode {
            Mode::Draw => Some(Overlay::Preview(Stroke {
                from: self.last.unwrap_or(tip),
                to: tip,
                color,
                thickness: thickness.saturating_add(thickness / 2),
            })),
            _ => Some(Overlay::EraserBox {
                span: kp.span(idx::INDEX_TIP, idx::MIDDLE_TIP),
                thickness,
            }),
        };

        Step { pen: Pen { last: Some(tip) }, mode, stroke, overlay }
    }
}
