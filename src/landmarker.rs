//! Hand landmarks from an external model running as a child process.
//!
//! Any program that speaks this line protocol can be plugged in, typically a
//! short wrapper around a MediaPipe-style hand landmarker:
//!
//! 1. On start it reads one JSON line with the [`LandmarkerConfig`] fields and
//!    answers `READY`.
//! 2. For each frame it reads `width`, `height`, `channels` (little-endian u32,
//!    channels is always 3) followed by `width * height * 3` bytes of RGB.
//! 3. It answers one JSON line:
//!    `{"hands":[{"handedness":"Right","score":0.97,"landmarks":[{"x":0.5,"y":0.4,"z":0.0}, ...]}]}`
//!    with coordinates normalized to `[0, 1]`. An `"error"` field marks a frame
//!    the model could not process. A hand with any coordinate outside `[-1, 2]`
//!    is dropped.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::Deserialize;

use crate::error::Error;
use crate::landmarks::{idx, Hand, Handedness, Keypoints, LandmarkProvider, LandmarkerConfig, LANDMARK_COUNT};
use crate::types::{channels, FrameBuffer, Point};

/// Normalized coordinates a little off-frame are normal near the edges; anything
/// past this range is garbage and would not fit in pixel arithmetic.
const COORD_RANGE: std::ops::RangeInclusive<f32> = -1.0..=2.0;

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    handedness: String,
    #[serde(default)]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionReply {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Turn one reply line into hands in pixel coordinates for a `width` x `height` frame.
fn parse_reply(line: &str, width: usize, height: usize) -> Result<Vec<Hand>, Error> {
    let reply: DetectionReply = serde_json::from_str(line.trim())
        .map_err(|e| Error::LandmarkerResponse(format!("bad reply {:?}: {e}", line.trim())))?;

    if let Some(error) = reply.error {
        return Err(Error::LandmarkerResponse(error));
    }

    let mut hands = Vec::with_capacity(reply.hands.len());
    for hand in reply.hands {
        if hand.landmarks.len() != LANDMARK_COUNT {
            log::warn!("expected {LANDMARK_COUNT} landmarks, got {}", hand.landmarks.len());
            continue;
        }
        let handedness: Handedness = match hand.handedness.parse() {
            Ok(h) => h,
            Err(e) => {
                log::warn!("{e}");
                continue;
            }
        };

        let off_frame = hand
            .landmarks
            .iter()
            .find(|lm| !COORD_RANGE.contains(&lm.x) || !COORD_RANGE.contains(&lm.y));
        if let Some(lm) = off_frame {
            log::warn!("dropping {handedness} hand, landmark at ({}, {}) is off the frame", lm.x, lm.y);
            continue;
        }

        let mut pts = [Point::default(); LANDMARK_COUNT];
        for (out, lm) in pts.iter_mut().zip(&hand.landmarks) {
            // truncate toward zero, the same way the model's own pixel helpers do
            *out = Point::new((lm.x * width as f32) as i32, (lm.y * height as f32) as i32);
        }
        log::trace!(
            "{handedness} hand (score {:.2}) index tip at ({}, {})",
            hand.score,
            pts[idx::INDEX_TIP].x,
            pts[idx::INDEX_TIP].y
        );
        hands.push(Hand { handedness, keypoints: Keypoints(pts) });
    }
    Ok(hands)
}

/// Landmark model behind a pipe.
pub struct ProcessLandmarker {
    process: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    scratch: Vec<u8>,
}

impl ProcessLandmarker {
    /// Start `program args...`, send it `config` and wait for it to report ready.
    ///
    /// This blocks while the model loads, which can take a few seconds.
    pub fn spawn(program: &str, args: &[String], config: &LandmarkerConfig) -> Result<Self, Error> {
        log::info!("starting hand landmarker: {program} {}", args.join(" "));

        let mut process = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::LandmarkerStart(format!("spawn {program}: {e}")))?;

        let (Some(stdin), Some(stdout)) = (process.stdin.take(), process.stdout.take()) else {
            let _ = process.kill();
            return Err(Error::LandmarkerStart("child has no stdio pipes".into()));
        };
        // From here on Drop kills the child if the handshake fails.
        let mut this = Self { process, stdin, stdout: BufReader::new(stdout), scratch: Vec::new() };

        let settings = serde_json::to_string(config)
            .map_err(|e| Error::LandmarkerStart(format!("encode settings: {e}")))?;
        writeln!(this.stdin, "{settings}")?;
        this.stdin.flush()?;

        let mut ready = String::new();
        this.stdout.read_line(&mut ready)?;
        if ready.trim() != "READY" {
            return Err(Error::LandmarkerStart(format!("expected READY, got {:?}", ready.trim())));
        }
        log::info!("hand landmarker ready ({config:?})");

        Ok(this)
    }
}

impl LandmarkProvider for ProcessLandmarker {
    fn detect(&mut self, frame: &FrameBuffer) -> Result<Vec<Hand>, Error> {
        self.scratch.clear();
        self.scratch.reserve(12 + frame.pixels.len() * 3);
        for v in [frame.width as u32, frame.height as u32, 3] {
            self.scratch.extend_from_slice(&v.to_le_bytes());
        }
        for &px in &frame.pixels {
            let (r, g, b) = channels(px);
            self.scratch.extend_from_slice(&[r, g, b]);
        }
        self.stdin.write_all(&self.scratch)?;
        self.stdin.flush()?;

        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(Error::LandmarkerPipe(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "landmarker closed its output",
            )));
        }
        parse_reply(&line, frame.width, frame.height)
    }
}

impl Drop for ProcessLandmarker {
    fn drop(&mut self) {
        // Kill the child so it does not outlive the window
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}
