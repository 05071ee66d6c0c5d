//! Sign-in and roles
//!
//! An [`IdentityProvider`] turns credentials into a [`User`]. The user's role
//! comes from their profile and falls back to [`Role::User`] when no profile
//! exists.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

pub mod http;
pub mod memory;

pub use http::HttpIdentity;
pub use memory::MemoryIdentity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  #[default]
  User,
  Admin,
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Role::User => write!(f, "user"),
      Role::Admin => write!(f, "admin"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub uid: String,
  pub email: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_name: Option<String>,
  #[serde(default)]
  pub role: Role,
}

impl User {
  pub fn new(uid: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
    Self { uid: uid.into(), email: email.into(), display_name: None, role }
  }

  /// The operator that local sources run as.
  pub fn local_operator() -> Self {
    Self {
      display_name: Some("Local operator".to_string()),
      ..Self::new("local", "operator@localhost", Role::Admin)
    }
  }

  pub fn is_admin(&self) -> bool {
    self.role == Role::Admin
  }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
  async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

  async fn sign_out(&self) -> Result<()>;

  /// Credential proving the current sign-in to the backend, if any.
  async fn token(&self) -> Option<String> {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_role_defaults_to_user() {
    let user: User = serde_json::from_str(r#"{"uid":"u1","email":"a@b.c"}"#).unwrap();
    assert_eq!(user.role, Role::User);
    assert!(!user.is_admin());
  }

  #[test]
  fn test_admin_role_from_profile() {
    let user: User =
      serde_json::from_str(r#"{"uid":"u1","email":"a@b.c","displayName":"Ops","role":"admin"}"#)
        .unwrap();
    assert!(user.is_admin());
    assert_eq!(user.display_name.as_deref(), Some("Ops"));
  }

  #[test]
  fn test_local_operator_is_admin() {
    assert!(User::local_operator().is_admin());
  }
}
