// What you SEE now:
// • Live camera is the base image (mirrored, like a selfie view).
// • Point with only your index finger: you draw with the brush color.
// • Raise index + middle + ring: you erase under the index fingertip.
// • Anything else lifts the pen. Q or ESC quits.
// • The top-left HUD shows FPS and the current mode.

mod air;
mod camera;
mod canvas;
mod config;
mod draw;
mod error;
mod fps;
mod gesture;
mod landmarker;
mod landmarks;
mod pen;
mod types;

use air::AirWriter;
use camera::CameraCapture;
use clap::Parser;
use config::Cli;
use draw::{draw_text_5x7, Drawer};
use error::Error;
use fps::FpsMeter;
use landmarker::ProcessLandmarker;
use landmarks::LandmarkProvider;
use std::time::Instant;

const HUD_COLOR: u32 = 0x00_FF_00_00;

fn main() -> Result<(), Error> {
    env_logger::init();

    let cli = Cli::parse();
    cli.validate()?;

    /* --- Camera ---
       The first frame fixes the canvas size; the device may not honor the request exactly. */
    let mut cam = CameraCapture::new(cli.camera, cli.width, cli.height, !cli.no_mirror)?;
    let first = cam.next_frame()?;
    let (w, h) = (first.width, first.height);
    if cam.resolution() != (w as u32, h as u32) {
        log::warn!("camera reports {:?} but delivers {w}x{h}", cam.resolution());
    }

    /* --- Hand landmarker (external model) --- */
    let mut landmarker =
        ProcessLandmarker::spawn(&cli.landmarker, &cli.landmarker_args, &cli.landmarker_config())?;

    /* --- Window + drawing session ---
       Visual: window opens; the canvas starts empty and lives until exit. */
    let mut drawer = Drawer::new("Air Writing", w, h)?;
    let mut writer = AirWriter::new(w, h, cli.brushes(), cli.hand, cli.debug_overlay);
    let mut fps = FpsMeter::new();
    log::info!("tracking the {} hand; Q quits", cli.hand);

    /* ------------------------------ Main loop ------------------------------ */
    let mut next = Some(first);
    while drawer.is_open() && !drawer.quit_pressed() {
        // 1) Live frame; a capture failure ends the session.
        let mut frame = match next.take() {
            Some(f) => f,
            None => cam.next_frame()?,
        };

        // 2) Hands. A garbled reply costs one tick, nothing else.
        let hands = match landmarker.detect(&frame) {
            Ok(hands) => hands,
            Err(e) if e.is_transient() => {
                log::warn!("no hands this tick: {e}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        // 3) Gesture -> pen -> canvas -> composite onto the frame.
        let mode = writer.tick(&mut frame, &hands)?;

        // 4) HUD
        fps.tick(Instant::now());
        let hud = format!("{} | {}", fps.hud_text(), mode.label());
        draw_text_5x7(&mut frame, 10, 10, &hud, 2, HUD_COLOR);

        // 5) Present (this is when the on-screen image updates).
        drawer.present(&frame)?;
    }

    log::info!("window closed");
    Ok(())
}
