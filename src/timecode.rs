//! Chunk duration timestamps
//!
//! Chunk inventories record durations as `HH:MM:SS.hh` timestamps with
//! centisecond resolution. `Timecode` parses, adds, and renders those
//! values losslessly; fractional seconds only appear when converting to
//! or from `f64` seconds.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, WavechunkError};

const CENTIS_PER_SECOND: u64 = 100;
const CENTIS_PER_MINUTE: u64 = 60 * CENTIS_PER_SECOND;
const CENTIS_PER_HOUR: u64 = 60 * CENTIS_PER_MINUTE;

/// A non-negative duration with centisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timecode {
    centis: u64,
}

impl Timecode {
    /// The zero duration, `00:00:00.00`.
    pub fn zero() -> Self {
        Timecode { centis: 0 }
    }

    /// Parse an `HH:MM:SS.hh` timestamp.
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() != 3 {
            return Err(WavechunkError::invalid_input(format!(
                "'{text}' is not an HH:MM:SS.hh timestamp"
            )));
        }

        let hours = parse_field(parts[0], text)?;
        let minutes = parse_field(parts[1], text)?;
        let (seconds, centis) = match parts[2].split_once('.') {
            Some((secs, frac)) => {
                if frac.len() != 2 {
                    return Err(WavechunkError::invalid_input(format!(
                        "'{text}' must carry exactly two fractional digits"
                    )));
                }
                (parse_field(secs, text)?, parse_field(frac, text)?)
            }
            None => (parse_field(parts[2], text)?, 0),
        };

        if minutes >= 60 || seconds >= 60 {
            return Err(WavechunkError::invalid_input(format!(
                "'{text}' has out-of-range minutes or seconds"
            )));
        }

        Ok(Timecode {
            centis: hours * CENTIS_PER_HOUR
                + minutes * CENTIS_PER_MINUTE
                + seconds * CENTIS_PER_SECOND
                + centis,
        })
    }

    /// Build a timecode from fractional seconds, rounding to the nearest
    /// centisecond. Negative and non-finite values are rejected.
    pub fn from_seconds(seconds: f64) -> Result<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(WavechunkError::invalid_input(format!(
                "cannot build a timecode from {seconds} seconds"
            )));
        }
        Ok(Timecode {
            centis: (seconds * CENTIS_PER_SECOND as f64).round() as u64,
        })
    }

    /// Duration in fractional seconds.
    pub fn as_seconds(&self) -> f64 {
        self.centis as f64 / CENTIS_PER_SECOND as f64
    }

    /// Duration in whole centiseconds.
    pub fn as_centis(&self) -> u64 {
        self.centis
    }
}

fn parse_field(field: &str, whole: &str) -> Result<u64> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WavechunkError::invalid_input(format!(
            "non-numeric field '{field}' in timestamp '{whole}'"
        )));
    }
    field.parse().map_err(|_| {
        WavechunkError::invalid_input(format!("field '{field}' overflows in '{whole}'"))
    })
}

impl Add for Timecode {
    type Output = Timecode;

    fn add(self, rhs: Timecode) -> Timecode {
        Timecode {
            centis: self.centis + rhs.centis,
        }
    }
}

impl Sum for Timecode {
    fn sum<I: Iterator<Item = Timecode>>(iter: I) -> Timecode {
        iter.fold(Timecode::zero(), Add::add)
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.centis / CENTIS_PER_HOUR;
        let minutes = (self.centis % CENTIS_PER_HOUR) / CENTIS_PER_MINUTE;
        let seconds = (self.centis % CENTIS_PER_MINUTE) / CENTIS_PER_SECOND;
        let centis = self.centis % CENTIS_PER_SECOND;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}.{centis:02}")
    }
}

impl FromStr for Timecode {
    type Err = WavechunkError;

    fn from_str(s: &str) -> Result<Self> {
        Timecode::parse(s)
    }
}

// Serialized in the same HH:MM:SS.hh form the chunk inventories use.
impl Serialize for Timecode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timecode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timecode::parse(&text).map_err(de::Error::custom)
    }
}
