use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

use super::{IdentityProvider, Role, User};
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone)]
struct Account {
  password: String,
  user: User,
}

/// Accounts held in process, keyed by email.
#[derive(Debug, Default)]
pub struct MemoryIdentity {
  accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryIdentity {
  pub fn new() -> Self {
    Self::default()
  }

  pub async fn register(&self, email: &str, password: &str, role: Role) -> User {
    let user = User::new(format!("uid-{}", email.to_lowercase()), email, role);
    let account = Account { password: password.to_string(), user: user.clone() };
    self.accounts.write().await.insert(email.to_lowercase(), account);
    user
  }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
  async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
    let accounts = self.accounts.read().await;
    match accounts.get(&email.to_lowercase()) {
      Some(account) if account.password == password => {
        info!(uid = %account.user.uid, "signed in");
        Ok(account.user.clone())
      }
      _ => Err(CatalogError::InvalidCredentials),
    }
  }

  async fn sign_out(&self) -> Result<()> {
    Ok(())
  }
}
