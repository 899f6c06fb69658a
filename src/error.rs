//! Error types for the aria assistant

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the assistant
///
/// Failure classes map onto loop behaviour: `CaptureTimeout` and `Stt` are
/// absorbed within a single turn, `ModelMissing` terminates the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Audio device error
    #[error("audio error: {0}")]
    Audio(String),

    /// No speech onset within the listen window
    #[error("no speech detected within the listen window")]
    CaptureTimeout,

    /// Speech-to-text error (recoverable, triggers fallback or skips the turn)
    #[error("STT error: {0}")]
    Stt(String),

    /// Offline recognition model not provisioned (fatal)
    #[error(
        "offline model missing at {}: download a model from \
         https://alphacephei.com/vosk/models and unpack it there",
        .0.display()
    )]
    ModelMissing(PathBuf),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Action handler error
    #[error("handler error: {0}")]
    Handler(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
