//! The catalog session
//!
//! [`Catalog`] ties a record store to the session state. Every operation
//! checks access first, then reports its progress and outcome through the
//! reducer so [`Catalog::state`] always reflects what happened last.

use matcher::{filter_records, FilterCriteria, RawCriteria, Record};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::access::{self, Navigation, Route};
use crate::error::{CatalogError, Result};
use crate::identity::{IdentityProvider, User};
use crate::state::{reduce, Action, AppState};
use crate::store::{RecordDraft, RecordStore, SearchParams};

pub struct Catalog {
  store: Arc<dyn RecordStore>,
  state: AppState,
}

impl Catalog {
  pub fn new(store: Arc<dyn RecordStore>) -> Self {
    Self { store, state: AppState::default() }
  }

  pub fn state(&self) -> &AppState {
    &self.state
  }

  pub fn user(&self) -> Option<&User> {
    self.state.auth.user.as_ref()
  }

  pub fn dispatch(&mut self, action: Action) {
    let state = std::mem::take(&mut self.state);
    self.state = reduce(state, action);
  }

  /// Finish the initial session check with a previously saved user, if any.
  pub fn restore_session(&mut self, user: Option<User>) {
    match user {
      Some(user) => self.dispatch(Action::SetUser(user)),
      None => self.dispatch(Action::Logout),
    }
  }

  pub async fn sign_in(
    &mut self,
    identity: &dyn IdentityProvider,
    email: &str,
    password: &str,
  ) -> Result<User> {
    self.dispatch(Action::AuthLoading(true));
    match identity.sign_in(email, password).await {
      Ok(user) => {
        self.dispatch(Action::SetUser(user.clone()));
        Ok(user)
      }
      Err(e) => {
        self.dispatch(Action::AuthFailed(e.to_string()));
        Err(e)
      }
    }
  }

  pub async fn sign_out(&mut self, identity: &dyn IdentityProvider) -> Result<()> {
    identity.sign_out().await?;
    self.dispatch(Action::Logout);
    Ok(())
  }

  pub fn guard(&self, route: Route) -> Navigation {
    access::guard(route, &self.state.auth)
  }

  /// Filter a snapshot of the catalog against raw form input.
  pub async fn search(&mut self, raw: RawCriteria) -> Result<Vec<Record>> {
    self.require_user()?;

    let criteria = FilterCriteria::parse(&raw);
    for error in criteria.errors() {
      debug!("criterion ignored: {error}");
    }
    self.dispatch(Action::SearchStarted(raw));

    let snapshot = self.store.search(&SearchParams::prefilter(&criteria)).await;
    let records = self.settle(snapshot)?;
    let results = filter_records(&records, &criteria);

    self.dispatch(Action::SearchCompleted(results.clone()));
    Ok(results)
  }

  /// Run a coarse backend query without local filtering.
  pub async fn query(&self, params: &SearchParams) -> Result<Vec<Record>> {
    self.require_user()?;
    self.store.search(params).await
  }

  pub async fn get(&self, id: &str) -> Result<Record> {
    self.require_user()?;
    self.store.get(id).await
  }

  pub async fn load_admin(&mut self) -> Result<Vec<Record>> {
    self.require_admin("listing records")?;
    self.dispatch(Action::DataLoading(true));

    let listed = self.store.list().await;
    let items = self.settle(listed)?;
    self.dispatch(Action::AdminLoaded(items.clone()));
    Ok(items)
  }

  pub async fn add(&mut self, draft: RecordDraft) -> Result<Record> {
    let uid = self.require_admin("adding records")?;

    let added = self.store.add(draft, &uid).await;
    let record = self.settle(added)?;
    self.dispatch(Action::AdminItemAdded(record.clone()));
    Ok(record)
  }

  pub async fn update(&mut self, id: &str, draft: RecordDraft) -> Result<Record> {
    let uid = self.require_admin("updating records")?;

    let updated = self.store.update(id, draft, &uid).await;
    let record = self.settle(updated)?;
    self.dispatch(Action::AdminItemUpdated(record.clone()));
    Ok(record)
  }

  pub async fn delete(&mut self, id: &str) -> Result<String> {
    self.require_admin("deleting records")?;

    let deleted = self.store.delete(id).await;
    let id = self.settle(deleted)?;
    self.dispatch(Action::AdminItemDeleted(id.clone()));
    Ok(id)
  }

  fn require_user(&self) -> Result<&User> {
    match &self.state.auth.user {
      Some(user) if self.state.auth.is_authenticated => Ok(user),
      _ => Err(CatalogError::NotSignedIn),
    }
  }

  fn require_admin(&self, action: &str) -> Result<String> {
    let user = self.require_user()?;
    if !self.state.auth.is_admin {
      return Err(CatalogError::permission_denied(action));
    }
    Ok(user.uid.clone())
  }

  /// Record a store failure in the session state before handing it back.
  fn settle<T>(&mut self, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
      warn!("Store operation failed: {e}");
      self.dispatch(Action::Failed(e.to_string()));
    }
    result
  }
}
