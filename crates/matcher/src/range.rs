//! Closed integer bands written as `"<min>-<max>"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MatchError;

/// A closed band `[min, max]`.
///
/// Ordering of the bounds is not enforced: `Range { min: 1500, max: 900 }` is
/// representable and simply never overlaps anything with a positive width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
  pub min: i64,
  pub max: i64,
}

impl Range {
  pub fn new(min: i64, max: i64) -> Self {
    Self { min, max }
  }

  /// Length of the intersection with `other`, clamped at zero.
  pub fn overlap(&self, other: &Range) -> i64 {
    let upper = self.max.min(other.max);
    let lower = self.min.max(other.min);
    upper.saturating_sub(lower).max(0)
  }

  /// True when the intersection has positive length.
  ///
  /// Bands that only touch at a boundary, and zero-width bands, do not overlap.
  pub fn overlaps(&self, other: &Range) -> bool {
    self.overlap(other) > 0
  }
}

impl fmt::Display for Range {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.min, self.max)
  }
}

impl FromStr for Range {
  type Err = MatchError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_range(Some(s))?.ok_or_else(|| MatchError::malformed_range(s))
  }
}

/// Parse an interval like `"1000-1500"`.
///
/// Returns `Ok(None)` when there is nothing to parse (absent, empty or blank
/// input), which callers treat as "no constraint". Anything else that is not
/// exactly two integers around a single `-` is [`MatchError::MalformedRange`].
pub fn parse_range(text: Option<&str>) -> Result<Option<Range>, MatchError> {
  let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
    return Ok(None);
  };

  let mut parts = text.split('-');
  let (Some(min), Some(max), None) = (parts.next(), parts.next(), parts.next()) else {
    return Err(MatchError::malformed_range(text));
  };

  let min = parse_bound(min).ok_or_else(|| MatchError::malformed_range(text))?;
  let max = parse_bound(max).ok_or_else(|| MatchError::malformed_range(text))?;

  Ok(Some(Range { min, max }))
}

fn parse_bound(part: &str) -> Option<i64> {
  part.trim().parse().ok()
}
