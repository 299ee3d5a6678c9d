//! Silence-based WAV splitting
//!
//! Scans a recording block-by-block, classifies blocks below a level
//! threshold as silence, and cuts the recording into chunk files at
//! silence boundaries. Chunks are written as `<stem>.chunk<N>.wav` next
//! to the input, in the input's own sample format.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavWriter};
use log::{debug, info};

use crate::error::{Result, WavechunkError};
use crate::timecode::Timecode;

/// Tuning parameters for silence detection.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Mean absolute block level (0.0..=1.0, full scale) below which a
    /// block counts as silence.
    pub threshold: f64,
    /// Frames per analysis block.
    pub block_frames: usize,
    /// A cut is only taken once the running chunk is at least this long.
    pub min_chunk_secs: f64,
    /// A cut is forced once the running chunk reaches this length, even
    /// mid-sound.
    pub max_chunk_secs: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            threshold: 0.01,
            block_frames: 1024,
            min_chunk_secs: 1.0,
            max_chunk_secs: 30.0,
        }
    }
}

/// One chunk file produced by a split.
#[derive(Debug, Clone)]
pub struct ChunkFile {
    pub path: PathBuf,
    pub frames: u64,
    pub duration: Timecode,
}

/// The result of splitting one recording.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Chunk files, in recording order.
    pub chunks: Vec<ChunkFile>,
    /// Mean absolute level per analysis block, full-scale normalized.
    pub block_levels: Vec<f64>,
    /// Detected silence runs as `(start_frame, end_frame)` spans.
    pub silence_spans: Vec<(u64, u64)>,
}

/// All samples of the input, kept in the native format so chunks are
/// written losslessly.
enum Samples {
    Int(Vec<i32>),
    Float(Vec<f32>),
}

impl Samples {
    fn len(&self) -> usize {
        match self {
            Samples::Int(v) => v.len(),
            Samples::Float(v) => v.len(),
        }
    }

    /// Mean absolute level over a sample range, normalized to full scale.
    fn level(&self, range: std::ops::Range<usize>, full_scale: f64) -> f64 {
        if range.is_empty() {
            return 0.0;
        }
        let count = range.len() as f64;
        match self {
            Samples::Int(v) => {
                let sum: f64 = v[range].iter().map(|&s| (s as f64).abs()).sum();
                sum / count / full_scale
            }
            Samples::Float(v) => {
                let sum: f64 = v[range].iter().map(|&s| (s as f64).abs()).sum();
                sum / count
            }
        }
    }
}

/// Split `input` into chunk files at silence boundaries.
pub fn split_wav(input: &Path, config: &SplitConfig) -> Result<SplitOutcome> {
    if !input.exists() {
        return Err(WavechunkError::FileNotFound {
            path: input.display().to_string(),
        });
    }

    let reader = WavReader::open(input)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples = match spec.sample_format {
        SampleFormat::Int => {
            let collected: std::result::Result<Vec<i32>, _> =
                reader.into_samples::<i32>().collect();
            Samples::Int(collected?)
        }
        SampleFormat::Float => {
            let collected: std::result::Result<Vec<f32>, _> =
                reader.into_samples::<f32>().collect();
            Samples::Float(collected?)
        }
    };

    let total_frames = (samples.len() / channels) as u64;
    if total_frames == 0 {
        return Err(WavechunkError::EmptyAudio);
    }

    let full_scale = match spec.sample_format {
        SampleFormat::Int => (1i64 << (spec.bits_per_sample - 1)) as f64,
        SampleFormat::Float => 1.0,
    };

    // Per-block mean level, the stream splitter.c printed for plotting.
    let block_samples = config.block_frames * channels;
    let block_levels: Vec<f64> = (0..samples.len())
        .step_by(block_samples)
        .map(|start| {
            let end = (start + block_samples).min(samples.len());
            samples.level(start..end, full_scale)
        })
        .collect();

    let silent: Vec<bool> = block_levels.iter().map(|&l| l < config.threshold).collect();
    let silence_spans = silence_spans(&silent, config.block_frames as u64, total_frames);
    for &(from, to) in &silence_spans {
        debug!("silence from: {from} to {to}");
    }

    let min_frames = (config.min_chunk_secs * spec.sample_rate as f64) as u64;
    let max_frames = (config.max_chunk_secs * spec.sample_rate as f64) as u64;
    let boundaries = chunk_boundaries(
        &silent,
        config.block_frames as u64,
        total_frames,
        min_frames,
        max_frames,
    );

    let mut chunks = Vec::with_capacity(boundaries.len());
    let mut start_frame = 0u64;
    for (n, &end_frame) in boundaries.iter().enumerate() {
        let path = chunk_file_name(input, n);
        write_chunk(&path, &samples, spec, channels, start_frame, end_frame)?;

        let frames = end_frame - start_frame;
        let duration = Timecode::from_seconds(frames as f64 / spec.sample_rate as f64)?;
        info!("chunk {}: {} ({})", n, path.display(), duration);
        chunks.push(ChunkFile {
            path,
            frames,
            duration,
        });
        start_frame = end_frame;
    }

    Ok(SplitOutcome {
        chunks,
        block_levels,
        silence_spans,
    })
}

/// Chunk file name convention: `talk.wav` yields `talk.chunk0.wav`.
pub fn chunk_file_name(input: &Path, index: usize) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("chunk");
    let name = format!("{stem}.chunk{index}.wav");
    input.with_file_name(name)
}

/// Compute cut points as end-frame indices. The final boundary is always
/// the total frame count, so consecutive boundaries delimit the chunks.
///
/// A trailing chunk shorter than `min_frames` is folded into the chunk
/// before it.
fn chunk_boundaries(
    silent: &[bool],
    block_frames: u64,
    total_frames: u64,
    min_frames: u64,
    max_frames: u64,
) -> Vec<u64> {
    let mut boundaries = Vec::new();
    let mut chunk_start = 0u64;
    let mut seen_sound = false;

    for (i, &is_silent) in silent.iter().enumerate() {
        let block_end = ((i as u64 + 1) * block_frames).min(total_frames);
        let chunk_len = block_end - chunk_start;

        let cut = if is_silent {
            seen_sound && chunk_len >= min_frames
        } else {
            seen_sound = true;
            chunk_len >= max_frames
        };

        if cut && block_end < total_frames {
            boundaries.push(block_end);
            chunk_start = block_end;
            seen_sound = false;
        }
    }

    boundaries.push(total_frames);

    // Fold an undersized tail into the previous chunk.
    if boundaries.len() >= 2 {
        let tail_start = boundaries[boundaries.len() - 2];
        if total_frames - tail_start < min_frames {
            boundaries.remove(boundaries.len() - 2);
        }
    }

    boundaries
}

/// Contiguous silent block runs as frame spans.
fn silence_spans(silent: &[bool], block_frames: u64, total_frames: u64) -> Vec<(u64, u64)> {
    let mut spans = Vec::new();
    let mut run_start: Option<u64> = None;

    for (i, &is_silent) in silent.iter().enumerate() {
        let block_start = i as u64 * block_frames;
        match (is_silent, run_start) {
            (true, None) => run_start = Some(block_start),
            (false, Some(start)) => {
                spans.push((start, block_start));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        spans.push((start, total_frames));
    }

    spans
}

fn write_chunk(
    path: &Path,
    samples: &Samples,
    spec: hound::WavSpec,
    channels: usize,
    start_frame: u64,
    end_frame: u64,
) -> Result<()> {
    let start = start_frame as usize * channels;
    let end = end_frame as usize * channels;
    let mut writer = WavWriter::create(path, spec)?;

    match samples {
        Samples::Int(v) => {
            for &sample in &v[start..end] {
                writer.write_sample(sample)?;
            }
        }
        Samples::Float(v) => {
            for &sample in &v[start..end] {
                writer.write_sample(sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}
