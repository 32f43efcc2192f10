// Frame-rate readout for the HUD.
// Visual: the "FPS : n" number in the corner, updated every frame.

use std::time::Instant;

pub struct FpsMeter {
    last: Option<Instant>,
    fps: f32,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self { last: None, fps: 0.0 }
    }

    /// Record a frame finished at `now` and return the current rate.
    ///
    /// Two frames stamped with the same instant give no sample; the previous
    /// rate is kept instead of dividing by zero.
    pub fn tick(&mut self, now: Instant) -> f32 {
        if let Some(prev) = self.last {
            let dt = now.saturating_duration_since(prev).as_secs_f32();
            if dt > 0.0 {
                self.fps = 1.0 / dt;
            }
        }
        self.last = Some(now);
        self.fps
    }

    pub fn hud_text(&self) -> String {
        format!("FPS : {}", self.fps as u32)
    }
}
