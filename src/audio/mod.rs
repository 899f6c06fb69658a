//! Audio input: bounded microphone capture and the transient WAV artifact

mod capture;
mod wav;

pub use capture::{AudioCapture, AudioSample, SAMPLE_RATE};
pub use wav::{samples_to_wav, CaptureArtifact};
