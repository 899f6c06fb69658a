//! Audio capture from microphone
//!
//! One bounded listening attempt per call. The input stream is opened inside
//! [`AudioCapture::capture`] and dropped on every exit path, so the device is
//! never held across turns.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, StreamConfig};

use crate::{Error, Result};

/// Sample rate for audio capture (16kHz for speech)
pub const SAMPLE_RATE: u32 = 16000;

/// Ambient-noise calibration window before every listen
const CALIBRATION: Duration = Duration::from_secs(2);

/// Maximum wait for speech onset
const ONSET_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum phrase duration once speech has started
const PHRASE_TIMEOUT: Duration = Duration::from_secs(5);

/// Trailing silence that ends an utterance
const TRAILING_SILENCE: Duration = Duration::from_millis(500);

/// Poll interval while draining the stream buffer
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Floor for the speech-onset threshold, even in a very quiet room
const MIN_ENERGY_THRESHOLD: f32 = 0.01;

/// Multiplier applied to the calibrated noise floor
const NOISE_MARGIN: f32 = 1.5;

/// One captured utterance
#[derive(Debug, Clone)]
pub struct AudioSample {
    /// 16-bit mono PCM frames
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioSample {
    /// Number of PCM frames in the sample
    #[must_use]
    pub fn frames(&self) -> usize {
        self.samples.len()
    }
}

/// Captures bounded utterances from the default input device
pub struct AudioCapture {
    config: StreamConfig,
}

impl AudioCapture {
    /// Probe the default input device for a usable 16kHz mono configuration
    ///
    /// # Errors
    ///
    /// Returns error if no input device or suitable config is available
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device available".to_string()))?;

        let supported_config = device
            .supported_input_configs()
            .map_err(|e| Error::Audio(e.to_string()))?
            .find(|c| {
                c.channels() == 1
                    && c.min_sample_rate() <= SampleRate(SAMPLE_RATE)
                    && c.max_sample_rate() >= SampleRate(SAMPLE_RATE)
            })
            .ok_or_else(|| Error::Audio("no suitable audio config found".to_string()))?;

        let config = supported_config
            .with_sample_rate(SampleRate(SAMPLE_RATE))
            .config();

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            sample_rate = SAMPLE_RATE,
            channels = config.channels,
            "audio capture initialized"
        );

        Ok(Self { config })
    }

    /// Perform one listening attempt: calibrate against ambient noise, wait
    /// for speech onset, then record until trailing silence or the phrase
    /// limit
    ///
    /// # Errors
    ///
    /// Returns [`Error::CaptureTimeout`] if no speech starts within the
    /// onset window, or [`Error::Audio`] on device failure
    pub fn capture(&self) -> Result<AudioSample> {
        let buffer: Arc<Mutex<Vec<f32>>> = Arc::new(Mutex::new(Vec::new()));

        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or_else(|| Error::Audio("no input device".to_string()))?;

        let sink = Arc::clone(&buffer);
        let stream = device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    if let Ok(mut buf) = sink.lock() {
                        buf.extend_from_slice(data);
                    }
                },
                |err| {
                    tracing::error!(error = %err, "audio capture error");
                },
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?;

        stream.play().map_err(|e| Error::Audio(e.to_string()))?;

        // Recalibrate every call rather than once at startup; the environment
        // may have changed since the previous turn
        std::thread::sleep(CALIBRATION);
        let noise_floor = rms(&take(&buffer));
        let threshold = (noise_floor * NOISE_MARGIN).max(MIN_ENERGY_THRESHOLD);

        tracing::debug!(noise_floor, threshold, "calibrated, listening");

        // Wait for speech onset
        let onset_start = Instant::now();
        let mut speech: Vec<f32> = loop {
            if onset_start.elapsed() > ONSET_TIMEOUT {
                return Err(Error::CaptureTimeout);
            }
            std::thread::sleep(POLL_INTERVAL);
            let chunk = take(&buffer);
            if rms(&chunk) > threshold {
                break chunk;
            }
        };

        // Record until trailing silence or the phrase limit
        let phrase_start = Instant::now();
        let mut silence = Duration::ZERO;
        while phrase_start.elapsed() < PHRASE_TIMEOUT {
            std::thread::sleep(POLL_INTERVAL);
            let chunk = take(&buffer);
            let is_speech = rms(&chunk) > threshold;
            speech.extend_from_slice(&chunk);

            if is_speech {
                silence = Duration::ZERO;
            } else {
                silence += POLL_INTERVAL;
                if silence >= TRAILING_SILENCE {
                    break;
                }
            }
        }

        drop(stream);

        tracing::debug!(frames = speech.len(), "utterance captured");

        Ok(AudioSample {
            samples: speech.iter().map(|&s| to_i16(s)).collect(),
            sample_rate: SAMPLE_RATE,
        })
    }
}

/// Drain the shared stream buffer
fn take(buffer: &Arc<Mutex<Vec<f32>>>) -> Vec<f32> {
    buffer
        .lock()
        .map(|mut buf| std::mem::take(&mut *buf))
        .unwrap_or_default()
}

/// RMS energy of a chunk of samples
#[allow(clippy::cast_precision_loss)]
pub(crate) fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Convert a normalized f32 sample to 16-bit PCM
#[allow(clippy::cast_possible_truncation)]
fn to_i16(sample: f32) -> i16 {
    (sample * 32767.0).clamp(-32768.0, 32767.0) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rms() {
        let silence = vec![0.0f32; 100];
        assert!(rms(&silence) < 0.001);

        let loud = vec![0.5f32; 100];
        assert!(rms(&loud) > 0.4);
    }

    #[test]
    fn test_to_i16_clamps() {
        assert_eq!(to_i16(0.0), 0);
        assert_eq!(to_i16(1.5), 32767);
        assert_eq!(to_i16(-1.5), -32768);
    }
}
