use thiserror::Error;

/// Reasons a query or record value cannot take part in matching.
///
/// These never abort a search. A criterion holding one of these matches no
/// record, and a record whose band is malformed fails any range criterion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
  #[error("Malformed range '{input}': expected <min>-<max>")]
  MalformedRange { input: String },

  #[error("Not a number: '{input}'")]
  NotANumber { input: String },

  #[error("Unknown signal type '{input}'")]
  UnknownSignalType { input: String },
}

impl MatchError {
  pub fn malformed_range(input: impl Into<String>) -> Self {
    Self::MalformedRange { input: input.into() }
  }

  pub fn not_a_number(input: impl Into<String>) -> Self {
    Self::NotANumber { input: input.into() }
  }

  pub fn unknown_signal_type(input: impl Into<String>) -> Self {
    Self::UnknownSignalType { input: input.into() }
  }
}
