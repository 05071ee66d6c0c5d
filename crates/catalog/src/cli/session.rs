//! The saved sign-in for the remote source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::identity::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub user: User,
  pub backend_url: String,
  pub signed_in_at: DateTime<Utc>,
  /// Bearer token issued at sign-in
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub token: Option<String>,
}

impl Session {
  pub fn new(user: User, backend_url: impl Into<String>) -> Self {
    Self { user, backend_url: backend_url.into(), signed_in_at: Utc::now(), token: None }
  }

  pub fn with_token(mut self, token: Option<String>) -> Self {
    self.token = token;
    self
  }
}

/// The saved session, if one exists for this backend.
pub fn load(path: &Path, backend_url: &str) -> Result<Option<Session>> {
  if !path.exists() {
    return Ok(None);
  }

  let content = fs::read_to_string(path)?;
  let session: Session = match serde_json::from_str(&content) {
    Ok(session) => session,
    Err(e) => {
      warn!("Ignoring unreadable session file {}: {e}", path.display());
      return Ok(None);
    }
  };

  if session.backend_url != backend_url {
    debug!("Saved session belongs to {}, not {backend_url}", session.backend_url);
    return Ok(None);
  }
  Ok(Some(session))
}

pub fn save(path: &Path, session: &Session) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, serde_json::to_string_pretty(session)?)?;

  // The token is a credential
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o600);
    fs::set_permissions(path, perms)?;
  }

  Ok(())
}

/// Remove the saved session. Returns whether one existed.
pub fn clear(path: &Path) -> Result<bool> {
  if !path.exists() {
    return Ok(false);
  }
  fs::remove_file(path)?;
  Ok(true)
}
