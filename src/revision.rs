//! Dotted version number comparison
//!
//! A `Revision` is an ordered sequence of non-negative integers parsed from
//! a dotted-decimal string such as `"1.12.3"`. Ordering is numeric per
//! component (so `1.2.3 < 1.12.3`), and a sequence that is a strict prefix
//! of another sorts before it (`1.2.3 < 1.2.3.5`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, WavechunkError};

/// How to treat a dotted segment that is not a plain decimal number.
///
/// The historical behavior coerced such segments to `0` (permissive
/// string-to-integer parsing). `Strict` rejects them instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Non-numeric segments coerce to `0` (historical behavior).
    #[default]
    Lenient,
    /// Non-numeric segments fail construction with `InvalidInput`.
    Strict,
}

/// Accepted source shapes for constructing a [`Revision`].
///
/// Construction dispatches once over this sum type; anything outside these
/// shapes is unrepresentable and the remaining failure cases (empty text,
/// non-finite numerics, strict-mode malformed segments) surface as
/// `InvalidInput`.
#[derive(Debug, Clone)]
pub enum RevisionSource<'a> {
    /// A dotted-decimal string, e.g. `"1.2.3"`.
    Text(&'a str),
    /// A numeric value whose decimal rendering is treated as text,
    /// e.g. `2.3` becomes `[2, 3]`.
    Numeric(f64),
    /// An existing revision; yields an independent copy of its components.
    Copy(&'a Revision),
}

/// A dotted version number, stored most-significant component first.
///
/// Immutable after construction; clones own independent component
/// sequences. Any number of threads may compare instances concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Revision {
    components: Vec<u64>,
}

impl Revision {
    /// Construct from any accepted source shape using the given parse mode.
    pub fn new(source: RevisionSource<'_>, mode: ParseMode) -> Result<Self> {
        match source {
            RevisionSource::Text(text) => Self::parse_with(text, mode),
            RevisionSource::Numeric(value) => {
                if !value.is_finite() || value < 0.0 {
                    return Err(WavechunkError::invalid_input(format!(
                        "cannot build a revision from {value}"
                    )));
                }
                // The decimal rendering is authoritative, trailing-zero loss
                // and all: 2.30 parses as [2, 3].
                Self::parse_with(&value.to_string(), mode)
            }
            RevisionSource::Copy(other) => Ok(other.clone()),
        }
    }

    /// Parse a dotted-decimal string in lenient mode.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, ParseMode::Lenient)
    }

    /// Parse a dotted-decimal string with an explicit parse mode.
    pub fn parse_with(text: &str, mode: ParseMode) -> Result<Self> {
        if text.is_empty() {
            return Err(WavechunkError::invalid_input(
                "empty string is not a version number",
            ));
        }

        let components = text
            .split('.')
            .map(|segment| match segment.parse::<u64>() {
                Ok(n) => Ok(n),
                Err(_) => match mode {
                    ParseMode::Lenient => Ok(lenient_segment(segment)),
                    ParseMode::Strict => Err(WavechunkError::invalid_input(format!(
                        "malformed segment '{segment}' in '{text}'"
                    ))),
                },
            })
            .collect::<Result<Vec<u64>>>()?;

        Ok(Revision { components })
    }

    /// Construct from a numeric value via its decimal string form.
    pub fn from_numeric(value: f64) -> Result<Self> {
        Self::new(RevisionSource::Numeric(value), ParseMode::Lenient)
    }

    /// The component sequence, most significant first.
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Consume the revision, yielding its component sequence.
    pub fn into_components(self) -> Vec<u64> {
        self.components
    }

    /// Canonical three-way comparison; all relational operators derive
    /// from this.
    pub fn compare(&self, other: &Revision) -> Ordering {
        // Slice ordering is element-wise with the prefix rule, exactly the
        // contract we need.
        self.components.cmp(&other.components)
    }
}

/// Leading digits parse, anything else is zero. Mirrors the permissive
/// string-to-integer coercion the original segments went through, so
/// `"3rc1"` is 3 and `"beta"` is 0.
fn lenient_segment(segment: &str) -> u64 {
    let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

impl Ord for Revision {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for Revision {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.components.iter().map(u64::to_string).collect();
        write!(f, "{}", rendered.join("."))
    }
}

impl FromStr for Revision {
    type Err = WavechunkError;

    fn from_str(s: &str) -> Result<Self> {
        Revision::parse(s)
    }
}
