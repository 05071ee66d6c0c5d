use async_trait::async_trait;
use matcher::Record;
use serde::Serialize;

use super::{RecordDraft, RecordStore, SearchParams};
use crate::client::{BackendClient, ClientConfig};
use crate::error::{CatalogError, Result};

/// Records served by the remote catalog backend.
#[derive(Debug, Clone)]
pub struct HttpStore {
  client: BackendClient,
}

#[derive(Serialize)]
struct WriteRequest<'a> {
  record: &'a RecordDraft,
  uid: &'a str,
}

impl HttpStore {
  pub fn new(config: ClientConfig) -> Result<Self> {
    Ok(Self { client: BackendClient::with_config(config)? })
  }

  pub fn with_client(client: BackendClient) -> Self {
    Self { client }
  }
}

/// A 404 on a record path means the record does not exist.
fn missing(id: &str) -> impl FnOnce(CatalogError) -> CatalogError + '_ {
  move |error| match error {
    CatalogError::Backend { status: 404, .. } => CatalogError::not_found(id),
    other => other,
  }
}

#[async_trait]
impl RecordStore for HttpStore {
  async fn search(&self, params: &SearchParams) -> Result<Vec<Record>> {
    self.client.post_json("/signals/search", params).await
  }

  async fn list(&self) -> Result<Vec<Record>> {
    self.client.get_json("/signals").await
  }

  async fn get(&self, id: &str) -> Result<Record> {
    self.client.get_json(&format!("/signals/{id}")).await.map_err(missing(id))
  }

  async fn add(&self, draft: RecordDraft, uid: &str) -> Result<Record> {
    draft.validate_new()?;
    self.client.post_json("/signals", &WriteRequest { record: &draft, uid }).await
  }

  async fn update(&self, id: &str, draft: RecordDraft, uid: &str) -> Result<Record> {
    draft.validate()?;
    self
      .client
      .put_json(&format!("/signals/{id}"), &WriteRequest { record: &draft, uid })
      .await
      .map_err(missing(id))
  }

  async fn delete(&self, id: &str) -> Result<String> {
    self.client.delete(&format!("/signals/{id}")).await.map_err(missing(id))?;
    Ok(id.to_string())
  }
}
