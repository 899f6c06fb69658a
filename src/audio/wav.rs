//! WAV encoding and the per-turn capture artifact
//!
//! Every turn writes the captured utterance to a transient WAV file for
//! hand-off to the recognizers. The file holds raw microphone audio, so
//! [`CaptureArtifact`] removes it on drop: no exit path of a turn can leave
//! it behind.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::audio::AudioSample;
use crate::{Error, Result};

/// Encode 16-bit mono PCM samples as WAV bytes
///
/// # Errors
///
/// Returns error if WAV encoding fails
pub fn samples_to_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).map_err(|e| Error::Audio(e.to_string()))?;

        for &sample in samples {
            writer
                .write_sample(sample)
                .map_err(|e| Error::Audio(e.to_string()))?;
        }

        writer.finalize().map_err(|e| Error::Audio(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

/// Transient WAV file for one capture attempt, deleted on drop
pub struct CaptureArtifact {
    path: PathBuf,
}

impl CaptureArtifact {
    /// Write a captured utterance to a fresh file in the system temp
    /// directory
    ///
    /// # Errors
    ///
    /// Returns error if encoding or writing fails
    pub fn write(sample: &AudioSample) -> Result<Self> {
        let path = artifact_path();
        let bytes = samples_to_wav(&sample.samples, sample.sample_rate)?;
        std::fs::write(&path, bytes)?;

        tracing::debug!(path = %path.display(), frames = sample.frames(), "capture artifact written");

        Ok(Self { path })
    }

    /// Path to the artifact file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the artifact back as raw WAV bytes for the networked recognizer
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }

    /// Read the artifact back as PCM frames for the offline recognizer
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be parsed as WAV
    pub fn read_frames(&self) -> Result<(Vec<i16>, u32)> {
        let mut reader =
            hound::WavReader::open(&self.path).map_err(|e| Error::Audio(e.to_string()))?;
        let sample_rate = reader.spec().sample_rate;
        let frames = reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<i16>, _>>()
            .map_err(|e| Error::Audio(e.to_string()))?;
        Ok((frames, sample_rate))
    }
}

impl Drop for CaptureArtifact {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove capture artifact");
        }
    }
}

/// Unique per-attempt path in the system temp directory
fn artifact_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("aria-capture-{}-{nanos}.wav", std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SAMPLE_RATE;

    fn test_sample() -> AudioSample {
        AudioSample {
            samples: vec![0, 1000, -1000, 32767, -32768, 250],
            sample_rate: SAMPLE_RATE,
        }
    }

    #[test]
    fn test_samples_to_wav_header() {
        let wav = samples_to_wav(&test_sample().samples, SAMPLE_RATE).unwrap();
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert!(wav.len() > 44);
    }

    #[test]
    fn test_artifact_removed_on_drop() {
        let sample = test_sample();
        let artifact = CaptureArtifact::write(&sample).unwrap();
        let path = artifact.path().to_path_buf();
        assert!(path.exists());

        drop(artifact);
        assert!(!path.exists());
    }

    #[test]
    fn test_artifact_frames_roundtrip() {
        let sample = test_sample();
        let artifact = CaptureArtifact::write(&sample).unwrap();

        let (frames, rate) = artifact.read_frames().unwrap();
        assert_eq!(rate, SAMPLE_RATE);
        assert_eq!(frames, sample.samples);
    }
}
