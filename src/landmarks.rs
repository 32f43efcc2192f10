//! Hand keypoints as delivered by an external landmark model.
//!
//! The model itself lives outside this crate. Anything that can turn a frame
//! into 21-point hands implements [`LandmarkProvider`]; the rest of the app only
//! ever sees [`Hand`]s in pixel coordinates.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;
use crate::types::{FrameBuffer, Point};

/// Landmark indices (standard 21-point hand model).
#[allow(dead_code)]
pub mod idx {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_DIP: usize = 7;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_MCP: usize = 9;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_DIP: usize = 11;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_MCP: usize = 13;
    pub const RING_PIP: usize = 14;
    pub const RING_DIP: usize = 15;
    pub const RING_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

pub const LANDMARK_COUNT: usize = 21;

/// Bones of the hand skeleton, as pairs of landmark indices.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (0, 17), (17, 18), (18, 19), (19, 20),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Handedness {
    Left,
    Right,
}

impl FromStr for Handedness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Handedness::Left),
            "right" => Ok(Handedness::Right),
            _ => Err(Error::HandLabel(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Left => f.write_str("left"),
            Handedness::Right => f.write_str("right"),
        }
    }
}

/// The 21 keypoints of one hand, in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keypoints(pub [Point; LANDMARK_COUNT]);

impl Keypoints {
    #[inline]
    pub fn at(&self, index: usize) -> Point {
        self.0[index]
    }

    /// Smallest rectangle holding every keypoint, as (min, max) corners.
    pub fn bounding_box(&self) -> (Point, Point) {
        let mut min = self.0[0];
        let mut max = self.0[0];
        for p in &self.0[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }

    /// Straight-line measurement between two landmarks.
    pub fn span(&self, a: usize, b: usize) -> Span {
        Span::between(self.at(a), self.at(b))
    }
}

/// Distance between two points, with the endpoints and their midpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Span {
    pub length: f32,
    pub from: Point,
    pub to: Point,
    pub mid: Point,
}

impl Span {
    pub fn between(from: Point, to: Point) -> Self {
        let dx = (to.x - from.x) as f32;
        let dy = (to.y - from.y) as f32;
        Self {
            length: dx.hypot(dy),
            from,
            to,
            // floor division, so negative coordinates round the same way as positive ones
            mid: Point::new((from.x + to.x).div_euclid(2), (from.y + to.y).div_euclid(2)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub handedness: Handedness,
    pub keypoints: Keypoints,
}

/// First detected hand carrying the requested label.
pub fn find_hand(hands: &[Hand], wanted: Handedness) -> Option<&Hand> {
    hands.iter().find(|h| h.handedness == wanted)
}

/// Settings handed through to the landmark model untouched.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LandmarkerConfig {
    pub static_image_mode: bool,
    pub max_num_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for LandmarkerConfig {
    fn default() -> Self {
        Self {
            static_image_mode: false,
            max_num_hands: 2,
            model_complexity: 1,
            min_detection_confidence: 0.8,
            min_tracking_confidence: 0.5,
        }
    }
}

/// Anything that can find hands in a frame.
pub trait LandmarkProvider {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Vec<Hand>, Error>;
}
