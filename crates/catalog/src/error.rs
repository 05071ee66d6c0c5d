use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
  #[error("Signal not found: {id}")]
  NotFound { id: String },

  #[error("Not signed in")]
  NotSignedIn,

  #[error("Permission denied: {action} requires an admin account")]
  PermissionDenied { action: String },

  #[error("Invalid email or password")]
  InvalidCredentials,

  #[error("Invalid record: {message}")]
  InvalidRecord { message: String },

  #[error("Backend returned {status}: {message}")]
  Backend { status: u16, message: String },

  #[error("Backend request timed out after {secs}s")]
  Timeout { secs: u64 },

  #[error("Backend request failed: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Configuration error: {message}")]
  Config { message: String },

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl CatalogError {
  pub fn not_found(id: impl Into<String>) -> Self {
    Self::NotFound { id: id.into() }
  }

  pub fn permission_denied(action: impl Into<String>) -> Self {
    Self::PermissionDenied { action: action.into() }
  }

  pub fn invalid_record(message: impl Into<String>) -> Self {
    Self::InvalidRecord { message: message.into() }
  }

  pub fn backend(status: u16, message: impl Into<String>) -> Self {
    Self::Backend { status, message: message.into() }
  }

  pub fn config(message: impl Into<String>) -> Self {
    Self::Config { message: message.into() }
  }
}
