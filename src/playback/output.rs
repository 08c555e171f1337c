use thiserror::Error;

/// Why the audio output could not start (or keep) a track.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("track has no preview source")]
    NoSource,
    #[error("failed to fetch preview: {0}")]
    Fetch(String),
    #[error("failed to decode preview: {0}")]
    Decode(String),
    #[error("no audio output device: {0}")]
    NoOutputDevice(String),
    #[error("audio thread is not running")]
    Disconnected,
}

/// The audio device as seen by the controller.
///
/// `play` replaces whatever was loaded before. Completion and progress come
/// back to the controller as separate events (`on_ended`, `on_progress`).
pub trait AudioOutput {
    fn play(&mut self, source_ref: &str) -> Result<(), AudioError>;
    fn stop(&mut self);
}
