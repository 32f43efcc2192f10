// One error type for the whole app.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Updating the window buffer failed
    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed
    #[error("Capture unavailable: {0}")]
    CameraFrame(String), // Grabbing/decoding a frame failed
    #[error("Landmarker start error: {0}")]
    LandmarkerStart(String), // Spawning or handshaking with the landmarker failed
    #[error("Landmarker pipe error: {0}")]
    LandmarkerPipe(#[from] std::io::Error), // The landmarker process went away
    #[error("Landmarker response error: {0}")]
    LandmarkerResponse(String), // One reply could not be used; the next tick may be fine
    #[error("Unknown hand label: {0:?}")]
    HandLabel(String), // Neither "left" nor "right"
    #[error("Buffer size mismatch: {0}")]
    SizeMismatch(String), // Two buffers that must line up do not
    #[error("Config error: {0}")]
    Config(String), // A command-line value is out of range
}

impl Error {
    /// A tick that fails with one of these can be dropped; the loop keeps going.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::LandmarkerResponse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bad_replies_are_transient() {
        assert!(Error::LandmarkerResponse("garbled".into()).is_transient());
        assert!(!Error::CameraFrame("unplugged".into()).is_transient());
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert!(!Error::from(io).is_transient());
        assert!(!Error::HandLabel("both".into()).is_transient());
    }

    #[test]
    fn capture_failure_reads_as_unavailable() {
        let msg = Error::CameraFrame("Fetch frame: timeout".into()).to_string();
        assert_eq!(msg, "Capture unavailable: Fetch frame: timeout");
    }
}
