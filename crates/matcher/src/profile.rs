//! Descriptive detail shown on a record's card. None of it takes part in
//! matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A figure that is either a plain number (`68`) or free text (`"60-70"`,
/// `"2300, 900"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
  Number(i64),
  Text(String),
}

impl fmt::Display for Quantity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Quantity::Number(n) => write!(f, "{n}"),
      Quantity::Text(text) => f.write_str(text),
    }
  }
}

impl From<&str> for Quantity {
  fn from(text: &str) -> Self {
    let text = text.trim();
    text.parse().map(Quantity::Number).unwrap_or_else(|_| Quantity::Text(text.to_string()))
  }
}

impl From<i64> for Quantity {
  fn from(n: i64) -> Self {
    Quantity::Number(n)
  }
}

/// Flight characteristics. Stored flat on the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightProfile {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub max_height: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub work_height: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub flight_duration: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub flight_range: Option<String>,
  /// km/h
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cruising_speed: Option<Quantity>,
  /// km/h
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub max_speed: Option<Quantity>,
}

impl FlightProfile {
  pub fn is_empty(&self) -> bool {
    self == &Self::default()
  }

  /// Overwrite the fields that are set in `other`.
  pub fn merge(&mut self, other: FlightProfile) {
    macro_rules! take {
      ($($field:ident),*) => {
        $(if other.$field.is_some() { self.$field = other.$field; })*
      };
    }
    take!(max_height, work_height, flight_duration, flight_range, cruising_speed, max_speed);
  }
}

/// One communication link of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
  pub channel: String,
  /// MHz
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub frequency: Option<Quantity>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub features: Option<String>,
}

impl Channel {
  pub fn new(channel: impl Into<String>, frequency: i64, features: &str) -> Self {
    Self {
      channel: channel.into(),
      frequency: Some(Quantity::Number(frequency)),
      features: Some(features.to_string()),
    }
  }
}

/// `name;frequency;features`, where only the name is required.
impl FromStr for Channel {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parts = s.splitn(3, ';').map(str::trim);
    let channel = parts.next().filter(|c| !c.is_empty()).ok_or("channel name is required")?;
    let frequency = parts.next().filter(|f| !f.is_empty()).map(Quantity::from);
    let features = parts.next().filter(|f| !f.is_empty()).map(str::to_string);
    Ok(Self { channel: channel.to_string(), frequency, features })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_quantity_accepts_numbers_and_text() {
    let values: Vec<Quantity> = serde_json::from_str(r#"[68, "60-70"]"#).unwrap();
    assert_eq!(values, vec![Quantity::Number(68), Quantity::Text("60-70".to_string())]);
    assert_eq!(Quantity::from(" 5800 "), Quantity::Number(5800));
    assert_eq!(Quantity::from("2300, 900").to_string(), "2300, 900");
  }

  #[test]
  fn test_merge_keeps_unset_fields() {
    let mut profile =
      FlightProfile { max_height: Some("6000 м".to_string()), ..FlightProfile::default() };
    profile.merge(FlightProfile { max_speed: Some(Quantity::Number(75)), ..FlightProfile::default() });

    assert_eq!(profile.max_height.as_deref(), Some("6000 м"));
    assert_eq!(profile.max_speed, Some(Quantity::Number(75)));
  }

  #[test]
  fn test_channel_from_str() {
    let channel: Channel = "Відео; 5800; HD передача".parse().unwrap();
    assert_eq!(channel, Channel::new("Відео", 5800, "HD передача"));

    let bare: Channel = "Резервний".parse().unwrap();
    assert_eq!(bare.frequency, None);
    assert!(" ;5800".parse::<Channel>().is_err());
  }
}
