//! Merge planning and WAV concatenation
//!
//! After a recording is split into chunks, short neighbors are merged back
//! together so each merged piece stays under a duration budget. Planning
//! works purely on chunk durations; concatenation streams the WAV frames.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WavechunkError};
use crate::timecode::Timecode;

/// Default duration budget for one merged piece, in seconds.
pub const DEFAULT_WINDOW_SECS: f64 = 10.0;

/// One planned merge: a run of consecutive chunks and their total duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSet {
    /// Zero-based indices of the chunks in this set, in input order.
    pub chunk_indices: Vec<usize>,
    /// Durations of the member chunks.
    pub durations: Vec<Timecode>,
    /// Sum of the member durations.
    pub total: Timecode,
}

impl MergeSet {
    fn from_run(start: usize, durations: Vec<Timecode>) -> Self {
        let total = durations.iter().copied().sum();
        MergeSet {
            chunk_indices: (start..start + durations.len()).collect(),
            durations,
            total,
        }
    }
}

/// A full merge plan over an ordered chunk inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergePlan {
    /// The duration budget each set must stay within.
    pub window: Timecode,
    /// The planned sets, covering every chunk exactly once, in order.
    pub sets: Vec<MergeSet>,
}

/// Group consecutive chunk durations into sets whose totals stay within
/// `window`.
///
/// Chunks are accumulated in order; the chunk that pushes the running
/// total past the window closes the current set and opens the next one.
/// A single chunk longer than the window gets a set of its own. Every
/// chunk lands in exactly one set, including the trailing partial run.
pub fn plan_merges(durations: &[Timecode], window: Timecode) -> MergePlan {
    let mut sets = Vec::new();
    let mut run: Vec<Timecode> = Vec::new();
    let mut run_start = 0;
    let mut accumulated = Timecode::zero();

    for (i, &duration) in durations.iter().enumerate() {
        accumulated = accumulated + duration;
        run.push(duration);

        if accumulated > window && run.len() > 1 {
            let overflow = run.pop().unwrap_or(duration);
            let set = MergeSet::from_run(run_start, std::mem::take(&mut run));
            debug!("merge({}): chunks {:?}", set.total, set.chunk_indices);
            sets.push(set);
            run_start = i;
            run.push(overflow);
            accumulated = overflow;
        }
    }

    if !run.is_empty() {
        sets.push(MergeSet::from_run(run_start, run));
    }

    MergePlan { window, sets }
}

/// The frames of one concatenation input, read in its native sample format.
enum Frames {
    Int(Vec<i32>),
    Float(Vec<f32>),
}

/// Concatenate WAV files into `output`.
///
/// All inputs must share sample rate, channel count, and sample format;
/// mixed-rate inputs fail with `FormatMismatch` before anything is
/// written. Returns the total duration of the output.
pub fn concat_wavs(inputs: &[PathBuf], output: &Path) -> Result<Timecode> {
    if inputs.is_empty() {
        return Err(WavechunkError::invalid_input(
            "at least one input file is required",
        ));
    }

    let spec = scan_inputs(inputs)?;
    let mut writer = WavWriter::create(output, spec.wav)?;

    for path in inputs {
        let reader = WavReader::open(path)?;
        match read_frames(reader, spec.wav.sample_format)? {
            Frames::Int(samples) => {
                for sample in samples {
                    writer.write_sample(sample)?;
                }
            }
            Frames::Float(samples) => {
                for sample in samples {
                    writer.write_sample(sample)?;
                }
            }
        }
        info!("wrote from src: {}", path.display());
    }

    writer.finalize()?;

    let seconds = spec.total_frames as f64 / spec.wav.sample_rate as f64;
    Timecode::from_seconds(seconds)
}

struct ScannedSpec {
    wav: WavSpec,
    total_frames: u64,
}

/// Open every input once up front: validate that the specs agree and sum
/// the frame counts so the expected output length is known before writing.
fn scan_inputs(inputs: &[PathBuf]) -> Result<ScannedSpec> {
    let mut scanned: Option<ScannedSpec> = None;

    for path in inputs {
        if !path.exists() {
            return Err(WavechunkError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let reader = WavReader::open(path)?;
        let spec = reader.spec();
        let frames = reader.duration() as u64;
        let seconds = frames as f64 / spec.sample_rate as f64;
        info!("{} is {:.2} seconds", path.display(), seconds);

        match &mut scanned {
            None => {
                scanned = Some(ScannedSpec {
                    wav: spec,
                    total_frames: frames,
                });
            }
            Some(acc) => {
                if acc.wav != spec {
                    return Err(WavechunkError::FormatMismatch {
                        reason: format!(
                            "{} is {} Hz {}ch {}-bit, expected {} Hz {}ch {}-bit",
                            path.display(),
                            spec.sample_rate,
                            spec.channels,
                            spec.bits_per_sample,
                            acc.wav.sample_rate,
                            acc.wav.channels,
                            acc.wav.bits_per_sample,
                        ),
                    });
                }
                acc.total_frames += frames;
            }
        }
    }

    // inputs is non-empty, checked by the caller
    scanned.ok_or(WavechunkError::EmptyAudio)
}

fn read_frames<R: std::io::Read>(
    reader: WavReader<R>,
    format: SampleFormat,
) -> Result<Frames> {
    match format {
        SampleFormat::Int => {
            let samples: std::result::Result<Vec<i32>, _> =
                reader.into_samples::<i32>().collect();
            Ok(Frames::Int(samples?))
        }
        SampleFormat::Float => {
            let samples: std::result::Result<Vec<f32>, _> =
                reader.into_samples::<f32>().collect();
            Ok(Frames::Float(samples?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Timecode {
        Timecode::from_seconds(s).unwrap()
    }

    #[test]
    fn test_plan_groups_under_window() {
        let durations: Vec<Timecode> =
            [3.0, 4.0, 2.0, 6.0, 5.0].iter().map(|&s| secs(s)).collect();
        let plan = plan_merges(&durations, secs(10.0));

        assert_eq!(plan.sets.len(), 3);
        assert_eq!(plan.sets[0].chunk_indices, vec![0, 1, 2]);
        assert_eq!(plan.sets[0].total, secs(9.0));
        assert_eq!(plan.sets[1].chunk_indices, vec![3]);
        assert_eq!(plan.sets[2].chunk_indices, vec![4]);
        assert_eq!(plan.sets[2].total, secs(5.0));
    }

    #[test]
    fn test_plan_overflow_chunk_starts_next_set() {
        // The chunk that pushes past the window lands in the next set,
        // never in the one it overflowed.
        let durations: Vec<Timecode> =
            [6.0, 6.0, 6.0].iter().map(|&s| secs(s)).collect();
        let plan = plan_merges(&durations, secs(10.0));

        assert_eq!(plan.sets.len(), 3);
        for (i, set) in plan.sets.iter().enumerate() {
            assert_eq!(set.chunk_indices, vec![i]);
        }
    }

    #[test]
    fn test_plan_covers_every_chunk_once() {
        let durations: Vec<Timecode> = [
            0.32, 4.73, 1.82, 5.37, 5.08, 0.60, 5.21, 1.28, 1.34, 2.17, 0.32,
            3.71, 1.44, 3.61, 0.41, 5.34, 1.12, 0.99, 2.75, 1.98, 1.28,
        ]
        .iter()
        .map(|&s| secs(s))
        .collect();

        let plan = plan_merges(&durations, secs(10.0));

        let mut covered: Vec<usize> = plan
            .sets
            .iter()
            .flat_map(|s| s.chunk_indices.iter().copied())
            .collect();
        covered.sort_unstable();
        assert_eq!(covered, (0..durations.len()).collect::<Vec<_>>());

        // Only the chunk that overflowed a window may push a set past it,
        // and it always starts the following set instead.
        for set in &plan.sets {
            let without_last: Timecode =
                set.durations[..set.durations.len() - 1].iter().copied().sum();
            assert!(without_last <= secs(10.0));
        }
    }

    #[test]
    fn test_plan_single_long_chunk() {
        let durations = [secs(25.0)];
        let plan = plan_merges(&durations, secs(10.0));
        assert_eq!(plan.sets.len(), 1);
        assert_eq!(plan.sets[0].total, secs(25.0));
    }

    #[test]
    fn test_plan_empty_inventory() {
        let plan = plan_merges(&[], secs(10.0));
        assert!(plan.sets.is_empty());
    }

    #[test]
    fn test_plan_serializes() {
        let plan = plan_merges(&[secs(1.0), secs(2.0)], secs(10.0));
        let json = serde_json::to_string(&plan).unwrap();
        let restored: MergePlan = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.sets.len(), plan.sets.len());
        assert_eq!(restored.sets[0].total, plan.sets[0].total);
    }

    #[test]
    fn test_concat_requires_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let err = concat_wavs(&[], &dir.path().join("out.wav")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_concat_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.wav");
        let err =
            concat_wavs(&[missing], &dir.path().join("out.wav")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }
}
