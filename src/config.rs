// Startup settings, all from the command line.

use clap::Parser;

use crate::error::Error;
use crate::landmarks::{Handedness, LandmarkerConfig};
use crate::pen::Brushes;

/// Widest brush or eraser accepted, in pixels. Wider than any webcam frame.
pub const MAX_THICKNESS: u32 = 1000;

#[derive(Parser, Debug)]
#[command(name = "air-writing")]
#[command(version, about = "Draw in the air with your index finger in front of a webcam")]
pub struct Cli {
    /// Camera device index
    #[arg(long, default_value_t = 0)]
    pub camera: u32,

    /// Requested frame width (the device may pick the closest it supports)
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested frame height
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Show the camera as-is instead of mirrored
    #[arg(long)]
    pub no_mirror: bool,

    /// Hand that draws
    #[arg(long, value_enum, ignore_case = true, default_value_t = Handedness::Right)]
    pub hand: Handedness,

    /// Brush color as rrggbb or #rrggbb
    #[arg(long, value_name = "HEX", default_value = "#ff00ff", value_parser = parse_color)]
    pub brush_color: u32,

    /// Brush width in pixels
    #[arg(long, default_value_t = 15)]
    pub brush_thickness: u32,

    /// Eraser color as rrggbb or #rrggbb (the canvas background)
    #[arg(long, value_name = "HEX", default_value = "#000000", value_parser = parse_color)]
    pub eraser_color: u32,

    /// Eraser width in pixels
    #[arg(long, default_value_t = 50)]
    pub eraser_thickness: u32,

    /// Draw every detected hand's skeleton, plus joints and a box on the tracked one
    #[arg(long)]
    pub debug_overlay: bool,

    /// Hand landmarker program (see the landmarker module for the protocol)
    #[arg(long, value_name = "PROGRAM")]
    pub landmarker: String,

    /// Extra argument for the landmarker program (repeatable)
    #[arg(long = "landmarker-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub landmarker_args: Vec<String>,

    /// Treat every frame as an unrelated still image (no tracking between frames)
    #[arg(long)]
    pub static_mode: bool,

    /// Most hands the model looks for
    #[arg(long, default_value_t = 2)]
    pub max_hands: u32,

    /// Model complexity tier
    #[arg(long, default_value_t = 1)]
    pub model_complexity: u32,

    /// Minimum detection confidence, 0..=1
    #[arg(long, default_value_t = 0.8)]
    pub detection_confidence: f32,

    /// Minimum tracking confidence, 0..=1
    #[arg(long, default_value_t = 0.5)]
    pub tracking_confidence: f32,
}

/// Parse `rrggbb` / `#rrggbb` into 0x00RRGGBB.
pub fn parse_color(s: &str) -> Result<u32, String> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected 6 hex digits, got {s:?}"));
    }
    u32::from_str_radix(hex, 16).map_err(|e| format!("{s:?}: {e}"))
}

impl Cli {
    /// Reject values the rest of the app cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, v) in [
            ("detection confidence", self.detection_confidence),
            ("tracking confidence", self.tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::Config(format!("{name} must be within 0..=1, got {v}")));
            }
        }
        if self.brush_thickness == 0 || self.eraser_thickness == 0 {
            return Err(Error::Config("thickness must be at least 1 pixel".into()));
        }
        for (name, v) in [("brush", self.brush_thickness), ("eraser", self.eraser_thickness)] {
            if v > MAX_THICKNESS {
                return Err(Error::Config(format!("{name} thickness {v} is over {MAX_THICKNESS} pixels")));
            }
        }
        if self.max_hands == 0 {
            return Err(Error::Config("max hands must be at least 1".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!("frame size {}x{} is empty", self.width, self.height)));
        }
        Ok(())
    }

    pub fn brushes(&self) -> Brushes {
        Brushes {
            brush_color: self.brush_color,
            brush_thickness: self.brush_thickness,
            eraser_color: self.eraser_color,
            eraser_thickness: self.eraser_thickness,
        }
    }

    pub fn landmarker_config(&self) -> LandmarkerConfig {
        LandmarkerConfig {
            static_image_mode: self.static_mode,
            max_num_hands: self.max_hands,
            model_complexity: self.model_complexity,
            min_detection_confidence: self.detection_confidence,
            min_tracking_confidence: self.tracking_confidence,
        }
    }
}
