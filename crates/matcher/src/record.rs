use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::MatchError;
use crate::profile::{Channel, FlightProfile};
use crate::range::{parse_range, Range};

/// How a signal occupies its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
  /// Frequency hopping (ППРЧ)
  #[serde(rename = "ППРЧ")]
  FrequencyHopping,
  /// Fixed frequency (ФРЧ)
  #[serde(rename = "ФРЧ")]
  FixedFrequency,
}

impl SignalType {
  pub const ALL: [SignalType; 2] = [SignalType::FrequencyHopping, SignalType::FixedFrequency];

  /// The tag as stored on records.
  pub fn as_str(&self) -> &'static str {
    match self {
      SignalType::FrequencyHopping => "ППРЧ",
      SignalType::FixedFrequency => "ФРЧ",
    }
  }

  fn alias(&self) -> &'static str {
    match self {
      SignalType::FrequencyHopping => "frequency-hopping",
      SignalType::FixedFrequency => "fixed-frequency",
    }
  }
}

impl fmt::Display for SignalType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Case-sensitive: accepts the stored tag or its latin alias, nothing else.
impl FromStr for SignalType {
  type Err = MatchError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    SignalType::ALL
      .into_iter()
      .find(|t| t.as_str() == s || t.alias() == s)
      .ok_or_else(|| MatchError::unknown_signal_type(s))
  }
}

/// One catalog entry.
///
/// Two shapes exist in the wild. Demo records carry a single `frequency` and a
/// textual `range`; records from the backend carry `minFreq`/`maxFreq` bounds
/// and a `type` tag. Both deserialize into this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
  pub id: String,
  pub name: String,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub frequency: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub range: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub min_freq: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub max_freq: Option<i64>,
  #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
  pub signal_type: Option<SignalType>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub specs: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  #[serde(flatten)]
  pub flight: FlightProfile,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub signals: Vec<Channel>,

  // Stamped by the store, never read by matching
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub created_by: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_by: Option<String>,

  /// Keys without a field of their own, written back untouched
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Record {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      frequency: None,
      range: None,
      min_freq: None,
      max_freq: None,
      signal_type: None,
      description: None,
      specs: None,
      image: None,
      flight: FlightProfile::default(),
      signals: Vec::new(),
      created_at: None,
      updated_at: None,
      created_by: None,
      updated_by: None,
      extra: Map::new(),
    }
  }

  pub fn with_frequency(mut self, frequency: i64) -> Self {
    self.frequency = Some(frequency);
    self
  }

  pub fn with_range(mut self, range: impl Into<String>) -> Self {
    self.range = Some(range.into());
    self
  }

  pub fn with_bounds(mut self, min_freq: i64, max_freq: i64) -> Self {
    self.min_freq = Some(min_freq);
    self.max_freq = Some(max_freq);
    self
  }

  pub fn with_signal_type(mut self, signal_type: SignalType) -> Self {
    self.signal_type = Some(signal_type);
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn with_specs(mut self, specs: impl Into<String>) -> Self {
    self.specs = Some(specs.into());
    self
  }

  pub fn with_image(mut self, image: impl Into<String>) -> Self {
    self.image = Some(image.into());
    self
  }

  pub fn with_flight(mut self, flight: FlightProfile) -> Self {
    self.flight = flight;
    self
  }

  pub fn with_channel(mut self, channel: Channel) -> Self {
    self.signals.push(channel);
    self
  }

  /// The band this record operates in.
  ///
  /// Textual `range` wins when present. Otherwise the numeric bounds are used
  /// if both are set. `Ok(None)` means the record has no band at all.
  pub fn band(&self) -> Result<Option<Range>, MatchError> {
    match parse_range(self.range.as_deref())? {
      Some(range) => Ok(Some(range)),
      None => Ok(self.min_freq.zip(self.max_freq).map(|(min, max)| Range::new(min, max))),
    }
  }
}
