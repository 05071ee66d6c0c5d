//! Session state and its reducer
//!
//! All state a catalog session carries lives in [`AppState`] and changes only
//! through [`reduce`], which is pure: it takes the old state and an
//! [`Action`] and returns the new state.

use matcher::{RawCriteria, Record};

use crate::identity::User;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
  pub user: Option<User>,
  pub is_authenticated: bool,
  pub is_admin: bool,
  /// True until the first session check has finished
  pub loading: bool,
  pub error: Option<String>,
}

impl Default for AuthState {
  fn default() -> Self {
    Self { user: None, is_authenticated: false, is_admin: false, loading: true, error: None }
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataState {
  pub search_results: Vec<Record>,
  pub admin_items: Vec<Record>,
  pub loading: bool,
  pub error: Option<String>,
  pub last_query: RawCriteria,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
  pub auth: AuthState,
  pub data: DataState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
  SetUser(User),
  AuthLoading(bool),
  AuthFailed(String),
  Logout,
  SearchStarted(RawCriteria),
  SearchCompleted(Vec<Record>),
  AdminLoaded(Vec<Record>),
  DataLoading(bool),
  Failed(String),
  ClearError,
  AdminItemAdded(Record),
  AdminItemUpdated(Record),
  AdminItemDeleted(String),
}

pub fn reduce(state: AppState, action: Action) -> AppState {
  let AppState { mut auth, mut data } = state;

  match action {
    Action::SetUser(user) => {
      auth.is_authenticated = true;
      auth.is_admin = user.is_admin();
      auth.user = Some(user);
      auth.loading = false;
      auth.error = None;
    }
    Action::AuthLoading(loading) => auth.loading = loading,
    Action::AuthFailed(error) => {
      auth.error = Some(error);
      auth.loading = false;
    }
    Action::Logout => {
      auth = AuthState { loading: false, ..AuthState::default() };
    }
    Action::SearchStarted(query) => {
      data.last_query = query;
      data.loading = true;
      data.error = None;
    }
    Action::SearchCompleted(results) => {
      data.search_results = results;
      data.loading = false;
      data.error = None;
    }
    Action::AdminLoaded(items) => {
      data.admin_items = items;
      data.loading = false;
      data.error = None;
    }
    Action::DataLoading(loading) => data.loading = loading,
    Action::Failed(error) => {
      data.error = Some(error);
      data.loading = false;
    }
    Action::ClearError => data.error = None,
    Action::AdminItemAdded(record) => data.admin_items.push(record),
    Action::AdminItemUpdated(record) => {
      if let Some(slot) = data.admin_items.iter_mut().find(|item| item.id == record.id) {
        *slot = record;
      }
    }
    Action::AdminItemDeleted(id) => data.admin_items.retain(|item| item.id != id),
  }

  AppState { auth, data }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::identity::Role;

  fn apply(actions: Vec<Action>) -> AppState {
    actions.into_iter().fold(AppState::default(), reduce)
  }

  #[test]
  fn test_initial_state() {
    let state = AppState::default();
    assert!(state.auth.loading);
    assert!(!state.auth.is_authenticated);
    assert!(!state.data.loading);
    assert!(state.data.search_results.is_empty());
  }

  #[test]
  fn test_set_user_derives_flags() {
    let state = apply(vec![Action::SetUser(User::new("u1", "a@b.c", Role::Admin))]);
    assert!(state.auth.is_authenticated);
    assert!(state.auth.is_admin);
    assert!(!state.auth.loading);

    let state = apply(vec![Action::SetUser(User::new("u2", "v@b.c", Role::User))]);
    assert!(state.auth.is_authenticated);
    assert!(!state.auth.is_admin);
  }

  #[test]
  fn test_logout_clears_everything_auth() {
    let state = apply(vec![
      Action::SetUser(User::new("u1", "a@b.c", Role::Admin)),
      Action::AuthFailed("expired".to_string()),
      Action::Logout,
    ]);
    assert_eq!(state.auth.user, None);
    assert!(!state.auth.is_admin);
    assert!(!state.auth.loading);
    assert_eq!(state.auth.error, None);
  }

  #[test]
  fn test_search_lifecycle() {
    let query = RawCriteria { name: Some("dji".to_string()), ..RawCriteria::default() };
    let started = apply(vec![Action::Failed("old".to_string()), Action::SearchStarted(query.clone())]);
    assert!(started.data.loading);
    assert_eq!(started.data.error, None);
    assert_eq!(started.data.last_query, query);

    let done = reduce(started, Action::SearchCompleted(vec![Record::new("1", "DJI Mavic 3")]));
    assert!(!done.data.loading);
    assert_eq!(done.data.search_results.len(), 1);
  }

  #[test]
  fn test_failure_and_clear() {
    let state = apply(vec![Action::DataLoading(true), Action::Failed("boom".to_string())]);
    assert!(!state.data.loading);
    assert_eq!(state.data.error.as_deref(), Some("boom"));

    let state = reduce(state, Action::ClearError);
    assert_eq!(state.data.error, None);
  }

  #[test]
  fn test_admin_item_actions() {
    let state = apply(vec![
      Action::AdminLoaded(vec![Record::new("1", "a"), Record::new("2", "b")]),
      Action::AdminItemAdded(Record::new("3", "c")),
      Action::AdminItemUpdated(Record::new("2", "b2")),
      Action::AdminItemUpdated(Record::new("9", "ghost")),
      Action::AdminItemDeleted("1".to_string()),
    ]);

    let names: Vec<&str> = state.data.admin_items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["b2", "c"]);
  }
}
