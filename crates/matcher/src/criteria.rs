//! Search criteria, normalized once from raw form input.

use serde::{Deserialize, Serialize};

use crate::error::MatchError;
use crate::range::{parse_range, Range};
use crate::record::SignalType;

/// One field of a search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Constraint<T> {
  /// No constraint: every record passes.
  #[default]
  Unset,
  /// Records must satisfy this value.
  Value(T),
  /// The input could not be understood: no record passes.
  Invalid(MatchError),
}

impl<T> Constraint<T> {
  pub fn is_unset(&self) -> bool {
    matches!(self, Constraint::Unset)
  }

  pub fn value(&self) -> Option<&T> {
    match self {
      Constraint::Value(value) => Some(value),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&MatchError> {
    match self {
      Constraint::Invalid(error) => Some(error),
      _ => None,
    }
  }

  /// Evaluate the constraint against a record-specific predicate.
  pub fn admits(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
    match self {
      Constraint::Unset => true,
      Constraint::Value(value) => predicate(value),
      Constraint::Invalid(_) => false,
    }
  }
}

impl<T> From<Result<Option<T>, MatchError>> for Constraint<T> {
  fn from(parsed: Result<Option<T>, MatchError>) -> Self {
    match parsed {
      Ok(Some(value)) => Constraint::Value(value),
      Ok(None) => Constraint::Unset,
      Err(error) => Constraint::Invalid(error),
    }
  }
}

/// Search form values exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCriteria {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub frequency: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub range: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub signal_type: Option<String>,
}

impl RawCriteria {
  pub fn is_empty(&self) -> bool {
    [&self.name, &self.frequency, &self.range, &self.signal_type]
      .iter()
      .all(|field| non_blank(field.as_deref()).is_none())
  }
}

/// Typed search criteria.
///
/// The name is kept lower-cased so matching only folds the record side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
  pub name: Constraint<String>,
  pub frequency: Constraint<i64>,
  pub range: Constraint<Range>,
  pub signal_type: Constraint<SignalType>,
}

impl FilterCriteria {
  /// Criteria that match every record.
  pub fn any() -> Self {
    Self::default()
  }

  /// Normalize raw form input. Blank fields become [`Constraint::Unset`];
  /// fields that fail to parse become [`Constraint::Invalid`].
  pub fn parse(raw: &RawCriteria) -> Self {
    Self {
      name: Ok::<_, MatchError>(non_blank(raw.name.as_deref()).map(str::to_lowercase)).into(),
      frequency: parse_frequency(raw.frequency.as_deref()).into(),
      range: parse_range(raw.range.as_deref()).into(),
      signal_type: parse_signal_type(raw.signal_type.as_deref()).into(),
    }
  }

  pub fn with_name(mut self, name: &str) -> Self {
    self.name = Constraint::Value(name.to_lowercase());
    self
  }

  pub fn with_frequency(mut self, frequency: i64) -> Self {
    self.frequency = Constraint::Value(frequency);
    self
  }

  pub fn with_range(mut self, range: Range) -> Self {
    self.range = Constraint::Value(range);
    self
  }

  pub fn with_signal_type(mut self, signal_type: SignalType) -> Self {
    self.signal_type = Constraint::Value(signal_type);
    self
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_unset()
      && self.frequency.is_unset()
      && self.range.is_unset()
      && self.signal_type.is_unset()
  }

  /// Every field that could not be parsed.
  pub fn errors(&self) -> Vec<&MatchError> {
    [self.name.error(), self.frequency.error(), self.range.error(), self.signal_type.error()]
      .into_iter()
      .flatten()
      .collect()
  }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
  text.filter(|t| !t.trim().is_empty())
}

/// Reads the leading integer, so "2400 MHz" and "2400.5" both mean 2400.
fn parse_frequency(text: Option<&str>) -> Result<Option<i64>, MatchError> {
  non_blank(text)
    .map(|t| leading_integer(t.trim()).ok_or_else(|| MatchError::not_a_number(t)))
    .transpose()
}

fn leading_integer(text: &str) -> Option<i64> {
  let sign = usize::from(text.starts_with(['-', '+']));
  let end = text[sign..].find(|c: char| !c.is_ascii_digit()).map_or(text.len(), |i| sign + i);
  if end == sign {
    return None;
  }
  text[..end].parse().ok()
}

fn parse_signal_type(text: Option<&str>) -> Result<Option<SignalType>, MatchError> {
  non_blank(text).map(|t| t.trim().parse()).transpose()
}
