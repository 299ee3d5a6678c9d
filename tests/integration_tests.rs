//! Integration Tests
//!
//! End-to-end tests for the wavechunk split / plan / merge pipeline.

use std::f64::consts::PI;
use std::path::Path;

use approx::assert_relative_eq;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use pretty_assertions::assert_eq;

use wavechunk::merge::{concat_wavs, plan_merges};
use wavechunk::split::{split_wav, SplitConfig};
use wavechunk::{Revision, Timecode};

const SAMPLE_RATE: u32 = 8000;

fn test_spec() -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Write a mono 16-bit WAV made of tone and silence segments.
/// Each segment is `(duration_secs, audible)`.
fn write_tone_wav(path: &Path, segments: &[(f64, bool)]) {
    let mut writer = WavWriter::create(path, test_spec()).unwrap();

    for &(secs, audible) in segments {
        let frames = (secs * SAMPLE_RATE as f64) as usize;
        for i in 0..frames {
            let sample = if audible {
                let t = i as f64 / SAMPLE_RATE as f64;
                ((2.0 * PI * 440.0 * t).sin() * 16000.0) as i16
            } else {
                0
            };
            writer.write_sample(sample).unwrap();
        }
    }

    writer.finalize().unwrap();
}

fn frames_of(path: &Path) -> u32 {
    WavReader::open(path).unwrap().duration()
}

// === Split Tests ===

#[test]
fn test_split_cuts_at_silence() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("talk.wav");
    write_tone_wav(&input, &[(1.5, true), (0.5, false), (1.5, true)]);

    let outcome = split_wav(&input, &SplitConfig::default()).unwrap();

    assert_eq!(outcome.chunks.len(), 2);
    assert_eq!(outcome.chunks[0].path, dir.path().join("talk.chunk0.wav"));
    assert_eq!(outcome.chunks[1].path, dir.path().join("talk.chunk1.wav"));
    assert!(outcome.chunks.iter().all(|c| c.path.exists()));

    // No frame is lost or duplicated across the cut.
    let total: u64 = outcome.chunks.iter().map(|c| c.frames).sum();
    assert_eq!(total, (3.5 * SAMPLE_RATE as f64) as u64);
    assert!(!outcome.silence_spans.is_empty());
}

#[test]
fn test_split_continuous_tone_single_chunk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    write_tone_wav(&input, &[(2.0, true)]);

    let outcome = split_wav(&input, &SplitConfig::default()).unwrap();

    assert_eq!(outcome.chunks.len(), 1);
    assert_eq!(outcome.chunks[0].frames, 2 * SAMPLE_RATE as u64);
    assert!(outcome.silence_spans.is_empty());
}

#[test]
fn test_split_reports_block_levels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    write_tone_wav(&input, &[(1.0, true), (1.0, false)]);

    let outcome = split_wav(&input, &SplitConfig::default()).unwrap();

    assert!(!outcome.block_levels.is_empty());
    // Leading blocks carry the tone, trailing blocks are silent.
    assert!(outcome.block_levels[0] > 0.1);
    assert!(*outcome.block_levels.last().unwrap() < 0.01);
}

// === Merge Tests ===

#[test]
fn test_split_then_merge_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("talk.wav");
    write_tone_wav(&input, &[(1.5, true), (0.5, false), (1.5, true)]);
    let original_frames = frames_of(&input);

    let outcome = split_wav(&input, &SplitConfig::default()).unwrap();
    let chunk_paths: Vec<_> = outcome.chunks.iter().map(|c| c.path.clone()).collect();

    let output = dir.path().join("merged.wav");
    let total = concat_wavs(&chunk_paths, &output).unwrap();

    assert_eq!(frames_of(&output), original_frames);
    assert_relative_eq!(total.as_seconds(), 3.5, epsilon = 0.01);

    // Sample data survives the round trip untouched.
    let original: Vec<i16> = WavReader::open(&input)
        .unwrap()
        .into_samples::<i16>()
        .map(|s| s.unwrap())
        .collect();
    let merged: Vec<i16> = WavReader::open(&output)
        .unwrap()
        .into_samples::<i16>()
        .map(|s| s.unwrap())
        .collect();
    assert_eq!(original, merged);
}

#[test]
fn test_merge_rejects_mixed_sample_rates() {
    let dir = tempfile::tempdir().unwrap();

    let a = dir.path().join("a.wav");
    write_tone_wav(&a, &[(0.5, true)]);

    let b = dir.path().join("b.wav");
    let mut spec = test_spec();
    spec.sample_rate = 44100;
    let mut writer = WavWriter::create(&b, spec).unwrap();
    for _ in 0..4410 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let err = concat_wavs(&[a, b], &dir.path().join("out.wav")).unwrap_err();
    assert_eq!(err.error_code(), "FORMAT_MISMATCH");
}

// === Plan Tests ===

#[test]
fn test_plan_from_split_durations() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("talk.wav");
    write_tone_wav(
        &input,
        &[(1.5, true), (0.5, false), (1.5, true), (0.5, false), (1.5, true)],
    );

    let config = SplitConfig {
        min_chunk_secs: 0.5,
        ..SplitConfig::default()
    };
    let outcome = split_wav(&input, &config).unwrap();
    let durations: Vec<Timecode> = outcome.chunks.iter().map(|c| c.duration).collect();

    let window = Timecode::from_seconds(10.0).unwrap();
    let plan = plan_merges(&durations, window);

    // Everything fits one window here.
    assert_eq!(plan.sets.len(), 1);
    assert_eq!(plan.sets[0].durations.len(), outcome.chunks.len());
    assert_relative_eq!(plan.sets[0].total.as_seconds(), 5.5, epsilon = 0.02);
}

// === Revision Tests ===

#[test]
fn test_revision_sorting() {
    let mut revisions: Vec<Revision> = ["1.12.3", "1.2.3.5", "1.2.3", "2.0", "0.9.9"]
        .iter()
        .map(|s| Revision::parse(s).unwrap())
        .collect();
    revisions.sort();

    let sorted: Vec<String> = revisions.iter().map(Revision::to_string).collect();
    assert_eq!(sorted, vec!["0.9.9", "1.2.3", "1.2.3.5", "1.12.3", "2.0"]);
}
