use async_trait::async_trait;
use matcher::demo::demo_records;
use matcher::Record;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{RecordDraft, RecordStore, SearchParams};
use crate::error::{CatalogError, Result};

/// Records held in process.
#[derive(Debug, Default)]
pub struct MemoryStore {
  records: RwLock<Vec<Record>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_records(records: Vec<Record>) -> Self {
    Self { records: RwLock::new(records) }
  }

  /// Seeded with the six sample signals.
  pub fn demo() -> Self {
    Self::with_records(demo_records())
  }

  /// Every record in insertion order.
  pub async fn snapshot(&self) -> Vec<Record> {
    self.records.read().await.clone()
  }

  pub async fn replace(&self, records: Vec<Record>) {
    *self.records.write().await = records;
  }

  pub fn into_records(self) -> Vec<Record> {
    self.records.into_inner()
  }
}

#[async_trait]
impl RecordStore for MemoryStore {
  async fn search(&self, params: &SearchParams) -> Result<Vec<Record>> {
    let records = self.records.read().await;
    Ok(params.apply(records.iter().cloned()))
  }

  async fn list(&self) -> Result<Vec<Record>> {
    let mut records = self.snapshot().await;
    // newest first, unstamped records last
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(records)
  }

  async fn get(&self, id: &str) -> Result<Record> {
    let records = self.records.read().await;
    records.iter().find(|r| r.id == id).cloned().ok_or_else(|| CatalogError::not_found(id))
  }

  async fn add(&self, draft: RecordDraft, uid: &str) -> Result<Record> {
    draft.validate_new()?;

    let record = draft.create(Uuid::new_v4().to_string(), uid);
    self.records.write().await.push(record.clone());

    info!(id = %record.id, name = %record.name, "added record");
    Ok(record)
  }

  async fn update(&self, id: &str, draft: RecordDraft, uid: &str) -> Result<Record> {
    draft.validate()?;

    let mut records = self.records.write().await;
    let record =
      records.iter_mut().find(|r| r.id == id).ok_or_else(|| CatalogError::not_found(id))?;
    draft.merge_into(record, uid);

    info!(id, "updated record");
    Ok(record.clone())
  }

  async fn delete(&self, id: &str) -> Result<String> {
    let mut records = self.records.write().await;
    let index =
      records.iter().position(|r| r.id == id).ok_or_else(|| CatalogError::not_found(id))?;
    records.remove(index);

    info!(id, "deleted record");
    Ok(id.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use matcher::SignalType;

  #[tokio::test]
  async fn test_demo_store_contents() {
    let store = MemoryStore::demo();
    assert_eq!(store.list().await.unwrap().len(), 6);
    assert_eq!(store.get("4").await.unwrap().name, "Shahed-136");
  }

  #[tokio::test]
  async fn test_get_missing_is_not_found() {
    let store = MemoryStore::demo();
    let result = store.get("missing").await;
    assert!(matches!(result, Err(CatalogError::NotFound { id }) if id == "missing"));
  }

  #[tokio::test]
  async fn test_add_assigns_id_and_stamps() {
    let store = MemoryStore::new();
    let draft = RecordDraft {
      range: Some("860-870".to_string()),
      signal_type: Some(SignalType::FixedFrequency),
      ..RecordDraft::named("Orlan-10")
    };

    let record = store.add(draft, "admin-1").await.unwrap();
    assert!(Uuid::parse_str(&record.id).is_ok());
    assert_eq!(record.created_by.as_deref(), Some("admin-1"));
    assert!(record.created_at.is_some());
    assert_eq!(store.get(&record.id).await.unwrap(), record);
  }

  #[tokio::test]
  async fn test_add_rejects_invalid_drafts() {
    let store = MemoryStore::new();
    assert!(store.add(RecordDraft::default(), "u").await.is_err());

    let bad = RecordDraft { range: Some("1-2-3".to_string()), ..RecordDraft::named("x") };
    assert!(matches!(store.add(bad, "u").await, Err(CatalogError::InvalidRecord { .. })));
    assert!(store.snapshot().await.is_empty());
  }

  #[tokio::test]
  async fn test_list_is_newest_first() {
    let store = MemoryStore::new();
    let first = store.add(RecordDraft::named("first"), "u").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = store.add(RecordDraft::named("second"), "u").await.unwrap();

    let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
  }

  #[tokio::test]
  async fn test_update_merges_and_stamps() {
    let store = MemoryStore::demo();
    let draft = RecordDraft { frequency: Some(5800), ..RecordDraft::default() };

    let updated = store.update("1", draft, "editor").await.unwrap();
    assert_eq!(updated.name, "DJI Mavic 3");
    assert_eq!(updated.frequency, Some(5800));
    assert_eq!(updated.updated_by.as_deref(), Some("editor"));

    let missing = store.update("nope", RecordDraft::named("x"), "editor").await;
    assert!(matches!(missing, Err(CatalogError::NotFound { .. })));
  }

  #[tokio::test]
  async fn test_delete_returns_id() {
    let store = MemoryStore::demo();
    assert_eq!(store.delete("2").await.unwrap(), "2");
    assert!(store.get("2").await.is_err());
    assert!(matches!(store.delete("2").await, Err(CatalogError::NotFound { .. })));
  }

  #[tokio::test]
  async fn test_search_by_type() {
    let store = MemoryStore::demo();
    let params =
      SearchParams { signal_type: Some(SignalType::FixedFrequency), ..SearchParams::default() };
    let names: Vec<String> =
      store.search(&params).await.unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["Bayraktar TB2", "Shahed-136", "Reaper MQ-9"]);
  }
}
