//! Configuration: defaults, then `$CATALOG_HOME/config.yaml`, then
//! environment variables. CLI flags are applied last by the binary.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::client::ClientConfig;
use crate::error::{CatalogError, Result};

pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where records and accounts come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Source {
  /// Built-in sample catalog, held in memory
  #[default]
  Demo,
  /// JSON file on disk
  File,
  /// Remote catalog backend over HTTP
  Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub home: PathBuf,
  pub source: Source,
  pub backend_url: String,
  pub timeout_secs: u64,
  pub data_file: PathBuf,
  pub session_file: PathBuf,
}

/// Shape of `config.yaml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
  source: Option<Source>,
  backend_url: Option<String>,
  timeout_secs: Option<u64>,
  data_file: Option<PathBuf>,
}

impl Config {
  pub fn defaults(home: &Path) -> Self {
    Self {
      home: home.to_path_buf(),
      source: Source::default(),
      backend_url: DEFAULT_BACKEND_URL.to_string(),
      timeout_secs: DEFAULT_TIMEOUT_SECS,
      data_file: home.join("signals.json"),
      session_file: home.join("session.json"),
    }
  }

  /// Load using the resolved catalog home directory.
  pub fn load() -> Result<Self> {
    Self::load_from(&catalog_home()?)
  }

  pub fn load_from(home: &Path) -> Result<Self> {
    let mut config = Self::defaults(home);

    let path = home.join(CONFIG_FILE);
    if path.exists() {
      debug!("Reading config from {}", path.display());
      let content = fs::read_to_string(&path)?;
      let file: FileConfig = serde_yaml::from_str(&content)
        .map_err(|e| CatalogError::config(format!("{}: {e}", path.display())))?;
      config.merge_file(file);
    }

    config.merge_env()?;
    Ok(config)
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig { base_url: self.backend_url.clone(), timeout_secs: self.timeout_secs }
  }

  fn merge_file(&mut self, file: FileConfig) {
    if let Some(source) = file.source {
      self.source = source;
    }
    if let Some(url) = file.backend_url {
      self.backend_url = url;
    }
    if let Some(secs) = file.timeout_secs {
      self.timeout_secs = secs;
    }
    if let Some(path) = file.data_file {
      self.data_file = self.resolve(path);
    }
  }

  fn merge_env(&mut self) -> Result<()> {
    if let Some(source) = env_var("CATALOG_SOURCE") {
      self.source = <Source as ValueEnum>::from_str(&source, true)
        .map_err(|_| CatalogError::config(format!("Unknown CATALOG_SOURCE '{source}'")))?;
    }
    if let Some(url) = env_var("CATALOG_BACKEND_URL") {
      self.backend_url = url;
    }
    if let Some(secs) = env_var("CATALOG_TIMEOUT_SECS") {
      match secs.parse() {
        Ok(secs) => self.timeout_secs = secs,
        Err(e) => warn!("Invalid CATALOG_TIMEOUT_SECS '{secs}': {e}, using {}", self.timeout_secs),
      }
    }
    if let Some(path) = env_var("CATALOG_DATA_FILE") {
      self.data_file = self.resolve(PathBuf::from(path));
    }
    Ok(())
  }

  fn resolve(&self, path: PathBuf) -> PathBuf {
    if path.is_relative() {
      self.home.join(path)
    } else {
      path
    }
  }
}

/// The catalog home directory (`$CATALOG_HOME`, else `~/.signal-catalog`).
pub fn catalog_home() -> Result<PathBuf> {
  if let Some(home) = env_var("CATALOG_HOME") {
    return Ok(PathBuf::from(home));
  }

  let home =
    dirs::home_dir().ok_or_else(|| CatalogError::config("Could not determine home directory"))?;
  Ok(home.join(".signal-catalog"))
}

fn env_var(key: &str) -> Option<String> {
  std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
