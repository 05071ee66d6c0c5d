use async_trait::async_trait;
use matcher::Record;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

use super::{MemoryStore, RecordDraft, RecordStore, SearchParams};
use crate::error::Result;

/// A [`MemoryStore`] backed by a JSON array on disk.
///
/// The file is read once on open and rewritten after every mutation. Writes go
/// to a temporary file in the same directory which is then renamed over the
/// old one, so readers never see a partial file. Each mutation runs against a
/// copy of the catalog which only replaces the live one once it is on disk.
#[derive(Debug)]
pub struct FileStore {
  path: PathBuf,
  inner: MemoryStore,
  write_lock: Mutex<()>,
}

impl FileStore {
  /// Open the store at `path`. A missing file is an empty catalog.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let path = path.into();
    let records: Vec<Record> = if path.exists() {
      let content = fs::read_to_string(&path)?;
      if content.trim().is_empty() {
        Vec::new()
      } else {
        serde_json::from_str(&content)?
      }
    } else {
      Vec::new()
    };

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(Self { path, inner: MemoryStore::with_records(records), write_lock: Mutex::new(()) })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  async fn scratch(&self) -> MemoryStore {
    MemoryStore::with_records(self.inner.snapshot().await)
  }

  /// Write the mutated copy out, then make it the live catalog.
  async fn commit(&self, scratch: MemoryStore) -> Result<()> {
    let records = scratch.into_records();
    self.persist(&records)?;
    self.inner.replace(records).await;
    Ok(())
  }

  fn persist(&self, records: &[Record]) -> Result<()> {
    let dir = match self.path.parent() {
      Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
      _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut temp = NamedTempFile::new_in(&dir)?;
    serde_json::to_writer_pretty(&mut temp, records)?;
    temp.write_all(b"\n")?;
    temp.persist(&self.path).map_err(|e| e.error)?;

    debug!("Wrote {} records to {}", records.len(), self.path.display());
    Ok(())
  }
}

#[async_trait]
impl RecordStore for FileStore {
  async fn search(&self, params: &SearchParams) -> Result<Vec<Record>> {
    self.inner.search(params).await
  }

  async fn list(&self) -> Result<Vec<Record>> {
    self.inner.list().await
  }

  async fn get(&self, id: &str) -> Result<Record> {
    self.inner.get(id).await
  }

  async fn add(&self, draft: RecordDraft, uid: &str) -> Result<Record> {
    let _guard = self.write_lock.lock().await;
    let scratch = self.scratch().await;
    let record = scratch.add(draft, uid).await?;
    self.commit(scratch).await?;
    Ok(record)
  }

  async fn update(&self, id: &str, draft: RecordDraft, uid: &str) -> Result<Record> {
    let _guard = self.write_lock.lock().await;
    let scratch = self.scratch().await;
    let record = scratch.update(id, draft, uid).await?;
    self.commit(scratch).await?;
    Ok(record)
  }

  async fn delete(&self, id: &str) -> Result<String> {
    let _guard = self.write_lock.lock().await;
    let scratch = self.scratch().await;
    let id = scratch.delete(id).await?;
    self.commit(scratch).await?;
    Ok(id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::CatalogError;
  use tempfile::TempDir;

  #[tokio::test]
  async fn test_missing_file_is_empty() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::open(temp.path().join("signals.json")).unwrap();
    assert!(store.list().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_mutations_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("signals.json");

    let store = FileStore::open(&path).unwrap();
    let kept = store.add(RecordDraft::named("Orlan-10"), "admin").await.unwrap();
    let dropped = store.add(RecordDraft::named("Lancet"), "admin").await.unwrap();
    store
      .update(&kept.id, RecordDraft { frequency: Some(868), ..RecordDraft::default() }, "admin")
      .await
      .unwrap();
    store.delete(&dropped.id).await.unwrap();

    let reopened = FileStore::open(&path).unwrap();
    let records = reopened.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Orlan-10");
    assert_eq!(records[0].frequency, Some(868));
  }

  #[tokio::test]
  async fn test_reads_backend_shaped_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("signals.json");
    fs::write(
      &path,
      r#"[{"id":"a","name":"Orlan-10","minFreq":860,"maxFreq":870,"type":"ФРЧ"}]"#,
    )
    .unwrap();

    let store = FileStore::open(&path).unwrap();
    let record = store.get("a").await.unwrap();
    assert_eq!(record.min_freq, Some(860));
  }

  #[tokio::test]
  async fn test_failed_mutation_leaves_file_untouched() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("signals.json");
    let store = FileStore::open(&path).unwrap();

    let result = store.delete("ghost").await;
    assert!(matches!(result, Err(CatalogError::NotFound { .. })));
    assert!(!path.exists());
  }

  #[tokio::test]
  async fn test_failed_write_leaves_catalog_unchanged() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("signals.json");
    fs::write(&path, r#"[{"id":"1","name":"DJI Mavic 3"}]"#).unwrap();
    let store = FileStore::open(&path).unwrap();

    // a directory in the way makes every write fail
    fs::remove_file(&path).unwrap();
    fs::create_dir(&path).unwrap();

    assert!(store.add(RecordDraft::named("Ghost"), "admin").await.is_err());
    assert!(store.update("1", RecordDraft::named("Renamed"), "admin").await.is_err());
    assert!(store.delete("1").await.is_err());

    let names: Vec<String> = store.list().await.unwrap().into_iter().map(|r| r.name).collect();
    assert_eq!(names, vec!["DJI Mavic 3"]);
  }

  #[tokio::test]
  async fn test_rewrite_keeps_card_details_and_unknown_keys() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("signals.json");
    fs::write(
      &path,
      r#"[
        {"id":"1","name":"DJI Mavic 3","maxSpeed":75,"signals":[{"channel":"Video","frequency":5800}],"operator":"CN"},
        {"id":"2","name":"Lancet"}
      ]"#,
    )
    .unwrap();

    let store = FileStore::open(&path).unwrap();
    store.delete("2").await.unwrap();

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
      written,
      serde_json::json!([{
        "id": "1",
        "name": "DJI Mavic 3",
        "maxSpeed": 75,
        "signals": [{"channel": "Video", "frequency": 5800}],
        "operator": "CN"
      }])
    );
  }

  #[test]
  fn test_corrupt_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("signals.json");
    fs::write(&path, "{not json").unwrap();

    assert!(matches!(FileStore::open(&path), Err(CatalogError::Serialization(_))));
  }
}
