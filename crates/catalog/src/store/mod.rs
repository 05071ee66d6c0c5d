//! Record storage
//!
//! The [`RecordStore`] trait is the seam between the catalog and wherever
//! records actually live. Three implementations ship with the crate:
//!
//! - [`MemoryStore`]: records held in process, optionally seeded with the demo set
//! - [`FileStore`]: a memory store persisted to a JSON array on disk
//! - [`HttpStore`]: the remote catalog backend

use async_trait::async_trait;
use chrono::Utc;
use matcher::{parse_range, Channel, FilterCriteria, FlightProfile, Record, SignalType};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

pub mod file;
pub mod http;
pub mod memory;

pub use file::FileStore;
pub use http::HttpStore;
pub use memory::MemoryStore;

/// Default cap on backend search results
pub const DEFAULT_LIMIT: usize = 50;

#[async_trait]
pub trait RecordStore: Send + Sync {
  /// Records admitted by the coarse backend query.
  async fn search(&self, params: &SearchParams) -> Result<Vec<Record>>;

  /// Every record, newest first.
  async fn list(&self) -> Result<Vec<Record>>;

  async fn get(&self, id: &str) -> Result<Record>;

  async fn add(&self, draft: RecordDraft, uid: &str) -> Result<Record>;

  async fn update(&self, id: &str, draft: RecordDraft, uid: &str) -> Result<Record>;

  /// Remove a record and hand back its id.
  async fn delete(&self, id: &str) -> Result<String>;
}

/// Coarse query understood by backends.
///
/// Narrower than the matcher: the name is a case-sensitive prefix, bounds
/// compare against the record's own `minFreq`/`maxFreq`, and records missing a
/// constrained field are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub min_freq: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub max_freq: Option<i64>,
  #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
  pub signal_type: Option<SignalType>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub limit: Option<usize>,
}

impl Default for SearchParams {
  fn default() -> Self {
    Self { name: None, min_freq: None, max_freq: None, signal_type: None, limit: Some(DEFAULT_LIMIT) }
  }
}

impl SearchParams {
  /// The snapshot query used ahead of local filtering.
  ///
  /// Only the signal type is pushed down since it has the same meaning on
  /// both sides. No limit, so nothing the matcher would accept is cut off.
  pub fn prefilter(criteria: &FilterCriteria) -> Self {
    Self { signal_type: criteria.signal_type.value().copied(), limit: None, ..Self::default() }
  }

  pub fn admits(&self, record: &Record) -> bool {
    let name = self.name.as_deref().is_none_or(|prefix| record.name.starts_with(prefix));
    let min = self.min_freq.is_none_or(|min| record.min_freq.is_some_and(|f| f >= min));
    let max = self.max_freq.is_none_or(|max| record.max_freq.is_some_and(|f| f <= max));
    let kind = self.signal_type.is_none_or(|t| record.signal_type == Some(t));
    name && min && max && kind
  }

  /// Run the query over an in-memory snapshot.
  pub fn apply(&self, records: impl IntoIterator<Item = Record>) -> Vec<Record> {
    let mut selected: Vec<Record> = records.into_iter().filter(|r| self.admits(r)).collect();
    if self.name.is_some() {
      selected.sort_by(|a, b| a.name.cmp(&b.name));
    }
    if let Some(limit) = self.limit {
      selected.truncate(limit);
    }
    selected
  }
}

/// Editable fields of a record. `None` leaves a field untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
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
  /// Replaces the whole channel list when present
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub signals: Option<Vec<Channel>>,
}

impl RecordDraft {
  pub fn named(name: impl Into<String>) -> Self {
    Self { name: Some(name.into()), ..Self::default() }
  }

  pub fn is_empty(&self) -> bool {
    self == &Self::default()
  }

  /// Checks shared by add and update.
  pub fn validate(&self) -> Result<()> {
    if self.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
      return Err(CatalogError::invalid_record("name must not be blank"));
    }
    parse_range(self.range.as_deref())
      .map_err(|e| CatalogError::invalid_record(e.to_string()))?;
    Ok(())
  }

  /// Checks for a brand new record, which must at least be named.
  pub fn validate_new(&self) -> Result<()> {
    if self.name.is_none() {
      return Err(CatalogError::invalid_record("name is required"));
    }
    self.validate()
  }

  /// Build a new record, stamping creation and update audit fields.
  pub fn create(self, id: impl Into<String>, uid: &str) -> Record {
    let now = Utc::now();
    let mut record = Record::new(id, String::new());
    record.created_at = Some(now);
    record.created_by = Some(uid.to_string());
    self.merge_into(&mut record, uid);
    record.updated_at = Some(now);
    record
  }

  /// Overwrite the fields present in the draft and stamp the update.
  pub fn merge_into(self, record: &mut Record, uid: &str) {
    if let Some(name) = self.name {
      record.name = name;
    }
    if self.frequency.is_some() {
      record.frequency = self.frequency;
    }
    if self.range.is_some() {
      record.range = self.range;
    }
    if self.min_freq.is_some() {
      record.min_freq = self.min_freq;
    }
    if self.max_freq.is_some() {
      record.max_freq = self.max_freq;
    }
    if self.signal_type.is_some() {
      record.signal_type = self.signal_type;
    }
    if self.description.is_some() {
      record.description = self.description;
    }
    if self.specs.is_some() {
      record.specs = self.specs;
    }
    if self.image.is_some() {
      record.image = self.image;
    }
    record.flight.merge(self.flight);
    if let Some(signals) = self.signals {
      record.signals = signals;
    }
    record.updated_at = Some(Utc::now());
    record.updated_by = Some(uid.to_string());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use matcher::demo::demo_records;
  use matcher::Quantity;

  #[test]
  fn test_default_params_limit() {
    let params = SearchParams::default();
    assert_eq!(params.limit, Some(DEFAULT_LIMIT));
    assert!(params.admits(&Record::new("1", "anything")));
  }

  #[test]
  fn test_prefilter_pushes_only_type() {
    let criteria = FilterCriteria::any()
      .with_name("dji")
      .with_frequency(2400)
      .with_signal_type(SignalType::FixedFrequency);

    let params = SearchParams::prefilter(&criteria);
    assert_eq!(params.signal_type, Some(SignalType::FixedFrequency));
    assert_eq!(params.name, None);
    assert_eq!(params.min_freq, None);
    assert_eq!(params.limit, None);
  }

  #[test]
  fn test_name_is_case_sensitive_prefix() {
    let params = SearchParams { name: Some("DJI".to_string()), ..SearchParams::default() };
    let names: Vec<String> = params.apply(demo_records()).into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["DJI Mavic 3", "DJI Mini 2"]);

    let lower = SearchParams { name: Some("dji".to_string()), ..SearchParams::default() };
    assert!(lower.apply(demo_records()).is_empty());
  }

  #[test]
  fn test_bounds_require_fields() {
    let params = SearchParams { min_freq: Some(400), max_freq: Some(2500), ..SearchParams::default() };
    assert!(params.admits(&Record::new("1", "a").with_bounds(433, 2400)));
    assert!(!params.admits(&Record::new("2", "b").with_bounds(300, 2400)));
    assert!(!params.admits(&Record::new("3", "c").with_bounds(433, 5800)));
    // demo records carry only a text range
    assert!(!params.admits(&Record::new("4", "d").with_range("433-2400")));
  }

  #[test]
  fn test_limit_truncates() {
    let params = SearchParams { limit: Some(2), ..SearchParams::default() };
    assert_eq!(params.apply(demo_records()).len(), 2);
  }

  #[test]
  fn test_draft_validation() {
    assert!(RecordDraft::default().validate_new().is_err());
    assert!(RecordDraft::named("  ").validate_new().is_err());
    assert!(RecordDraft::named("Orlan-10").validate_new().is_ok());

    let bad_range = RecordDraft { range: Some("wide".to_string()), ..RecordDraft::named("x") };
    assert!(matches!(bad_range.validate(), Err(CatalogError::InvalidRecord { .. })));

    // updates may omit the name entirely
    assert!(RecordDraft::default().validate().is_ok());
  }

  #[test]
  fn test_create_stamps_audit_fields() {
    let draft = RecordDraft { frequency: Some(868), ..RecordDraft::named("Orlan-10") };
    let record = draft.create("abc", "admin-1");

    assert_eq!(record.id, "abc");
    assert_eq!(record.name, "Orlan-10");
    assert_eq!(record.frequency, Some(868));
    assert_eq!(record.created_by.as_deref(), Some("admin-1"));
    assert_eq!(record.updated_by.as_deref(), Some("admin-1"));
    assert_eq!(record.created_at, record.updated_at);
  }

  #[test]
  fn test_merge_keeps_absent_fields() {
    let mut record = Record::new("1", "DJI Mavic 3").with_frequency(2400).with_range("900-1500");
    let draft = RecordDraft { range: Some("900-1600".to_string()), ..RecordDraft::default() };
    draft.merge_into(&mut record, "editor");

    assert_eq!(record.name, "DJI Mavic 3");
    assert_eq!(record.frequency, Some(2400));
    assert_eq!(record.range.as_deref(), Some("900-1600"));
    assert_eq!(record.updated_by.as_deref(), Some("editor"));
    assert!(record.created_by.is_none());
  }

  #[test]
  fn test_merge_card_details() {
    let mut record = matcher::demo::demo_records().remove(0);
    let draft = RecordDraft {
      flight: FlightProfile { max_speed: Some(Quantity::Number(80)), ..FlightProfile::default() },
      signals: Some(vec![Channel::new("Відео", 5800, "HD")]),
      ..RecordDraft::default()
    };
    assert!(!draft.is_empty());
    draft.merge_into(&mut record, "editor");

    assert_eq!(record.flight.max_speed, Some(Quantity::Number(80)));
    assert_eq!(record.flight.max_height.as_deref(), Some("6000 м"));
    assert_eq!(record.signals, vec![Channel::new("Відео", 5800, "HD")]);
  }

  #[test]
  fn test_draft_accepts_backend_type_key() {
    let draft: RecordDraft = serde_json::from_str(r#"{"name":"x","type":"ФРЧ"}"#).unwrap();
    assert_eq!(draft.signal_type, Some(SignalType::FixedFrequency));
  }
}
