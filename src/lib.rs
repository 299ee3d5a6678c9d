//! Wavechunk - WAV Chunking Toolkit
//!
//! Utilities for chunking long WAV recordings:
//! - Split a recording into chunks at silence boundaries
//! - Normalize chunk file names from older splitter runs
//! - Plan which chunks to merge back under a duration budget
//! - Concatenate WAV files
//!
//! Also carries [`revision::Revision`], a dotted version number with
//! numeric (not lexical) ordering.

pub mod chunks;
pub mod cli;
pub mod error;
pub mod merge;
pub mod revision;
pub mod split;
pub mod timecode;

pub use error::{Result, WavechunkError};
pub use revision::{ParseMode, Revision, RevisionSource};
pub use timecode::Timecode;
