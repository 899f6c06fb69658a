//! Capture artifact integration tests
//!
//! Run without audio hardware: they exercise the WAV hand-off between
//! capture and recognition, not the microphone itself.

use aria_assistant::audio::{samples_to_wav, AudioSample, CaptureArtifact, SAMPLE_RATE};

fn utterance() -> AudioSample {
    // A short ramp, loud enough to be distinguishable from silence
    let samples: Vec<i16> = (0..1600i16).map(|i| (i % 2000) - 1000).collect();
    AudioSample {
        samples,
        sample_rate: SAMPLE_RATE,
    }
}

#[test]
fn wav_encoding_produces_a_valid_riff_container() {
    let wav = samples_to_wav(&utterance().samples, SAMPLE_RATE).unwrap();

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    // 44-byte header plus two bytes per 16-bit frame
    assert_eq!(wav.len(), 44 + utterance().samples.len() * 2);
}

#[test]
fn artifact_is_readable_by_both_recognizer_tiers() {
    let sample = utterance();
    let artifact = CaptureArtifact::write(&sample).unwrap();

    // Networked tier consumes raw WAV bytes
    let bytes = artifact.read_bytes().unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");

    // Offline tier consumes PCM frames at the capture rate
    let (frames, rate) = artifact.read_frames().unwrap();
    assert_eq!(rate, SAMPLE_RATE);
    assert_eq!(frames, sample.samples);
}

#[test]
fn artifact_never_outlives_its_turn() {
    let artifact = CaptureArtifact::write(&utterance()).unwrap();
    let path = artifact.path().to_path_buf();
    assert!(path.exists());

    drop(artifact);
    assert!(!path.exists());
}

#[test]
fn artifact_is_removed_even_when_recognition_fails() {
    use aria_assistant::recognize::LocalRecognizer;
    use aria_assistant::{Error, Language};

    let path;
    {
        let artifact = CaptureArtifact::write(&utterance()).unwrap();
        path = artifact.path().to_path_buf();

        // No model provisioned: the fatal error propagates...
        let local = LocalRecognizer::new(std::path::PathBuf::from("/nonexistent"));
        match local.transcribe(&artifact, Language::En) {
            Err(Error::ModelMissing(_)) => {}
            other => panic!("expected ModelMissing, got {other:?}"),
        }
    }

    // ...but the raw audio is gone regardless
    assert!(!path.exists());
}

#[test]
fn concurrent_artifacts_do_not_collide() {
    let first = CaptureArtifact::write(&utterance()).unwrap();
    let second = CaptureArtifact::write(&utterance()).unwrap();

    assert_ne!(first.path(), second.path());
}
