use anyhow::{anyhow, Context, Result};
use colored::*;
use matcher::RawCriteria;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

use crate::cli::display::{display_record, display_records, display_user};
use crate::cli::session::{self, Session};
use crate::client::BackendClient;
use crate::config::{Config, Source};
use crate::identity::{HttpIdentity, IdentityProvider, User};
use crate::service::Catalog;
use crate::store::{FileStore, HttpStore, MemoryStore, RecordDraft, RecordStore, SearchParams};

/// Build the record store for the configured source. `token` authenticates
/// requests to the remote source.
pub fn open_store(config: &Config, token: Option<String>) -> Result<Arc<dyn RecordStore>> {
  let store: Arc<dyn RecordStore> = match config.source {
    Source::Demo => Arc::new(MemoryStore::demo()),
    Source::File => Arc::new(
      FileStore::open(&config.data_file)
        .with_context(|| format!("Failed to open {}", config.data_file.display()))?,
    ),
    Source::Remote => {
      let client = BackendClient::with_config(config.client_config())?.with_token(token);
      Arc::new(HttpStore::with_client(client))
    }
  };
  Ok(store)
}

/// A catalog with the session restored: local sources run as the built-in
/// operator, the remote source uses whoever last logged in.
pub fn open_catalog(config: &Config) -> Result<Catalog> {
  debug!("Opening {:?} catalog", config.source);
  let (user, token) = match config.source {
    Source::Demo | Source::File => (Some(User::local_operator()), None),
    Source::Remote => match saved_session(config)? {
      Some(session) => (Some(session.user), session.token),
      None => (None, None),
    },
  };

  let mut catalog = Catalog::new(open_store(config, token)?);
  catalog.restore_session(user);
  Ok(catalog)
}

fn saved_session(config: &Config) -> Result<Option<Session>> {
  Ok(session::load(&config.session_file, &config.backend_url)?)
}

pub async fn search(config: &Config, criteria: RawCriteria) -> Result<()> {
  let mut catalog = open_catalog(config)?;
  let results = catalog.search(criteria).await?;

  if results.is_empty() {
    println!("No signals found.");
    return Ok(());
  }

  println!("{} Found {} signal(s)", "🔍".cyan(), results.len().to_string().bold());
  display_records(&results);
  Ok(())
}

pub async fn query(config: &Config, params: SearchParams) -> Result<()> {
  let catalog = open_catalog(config)?;
  let results = catalog.query(&params).await?;

  if results.is_empty() {
    println!("No signals found.");
    return Ok(());
  }

  display_records(&results);
  Ok(())
}

pub async fn list(config: &Config) -> Result<()> {
  let mut catalog = open_catalog(config)?;
  let records = catalog.load_admin().await?;

  if records.is_empty() {
    println!("No signals in the catalog.");
    return Ok(());
  }

  println!("{} {} signal(s)", "📂".cyan(), records.len().to_string().bold());
  display_records(&records);
  Ok(())
}

pub async fn get(config: &Config, id: &str) -> Result<()> {
  let catalog = open_catalog(config)?;
  let record = catalog.get(id).await?;
  display_record(&record);
  Ok(())
}

pub async fn add(config: &Config, draft: RecordDraft) -> Result<()> {
  let mut catalog = open_catalog(config)?;
  let record = catalog.add(draft).await?;

  println!("{} Added signal {} {}", "✓".green(), record.name.yellow(), record.id.cyan());
  Ok(())
}

pub async fn update(config: &Config, id: &str, draft: RecordDraft) -> Result<()> {
  if draft.is_empty() {
    return Err(anyhow!("Nothing to update: pass at least one field to change"));
  }

  let mut catalog = open_catalog(config)?;
  let record = catalog.update(id, draft).await?;

  println!("{} Updated signal {} {}", "✓".green(), record.name.yellow(), record.id.cyan());
  Ok(())
}

pub async fn delete(config: &Config, id: &str, force: bool) -> Result<()> {
  let mut catalog = open_catalog(config)?;
  let record = catalog.get(id).await?;

  if !force {
    print!("Are you sure you want to delete signal {} {}? (y/N): ", record.name.yellow(), id.cyan());
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    if response != "y" && response != "yes" {
      println!("Delete operation cancelled.");
      return Ok(());
    }
  }

  let id = catalog.delete(id).await?;
  println!("{} Deleted signal {} {}", "✓".green(), record.name.yellow(), id.cyan());
  Ok(())
}

pub async fn login(config: &Config, email: &str, password: Option<String>) -> Result<()> {
  if config.source != Source::Remote {
    println!("Local sources need no login, you are the built-in operator.");
    return Ok(());
  }

  let password = match password {
    Some(password) => password,
    None => rpassword::prompt_password("Password: ")?,
  };

  let identity = HttpIdentity::new(config.client_config())?;
  let mut catalog = Catalog::new(open_store(config, None)?);
  let user = catalog.sign_in(&identity, email, &password).await?;

  let saved = Session::new(user.clone(), &config.backend_url).with_token(identity.token().await);
  session::save(&config.session_file, &saved).context("Failed to save session")?;

  println!("{} Signed in", "✓".green());
  display_user(&user);
  Ok(())
}

pub async fn logout(config: &Config) -> Result<()> {
  if config.source != Source::Remote {
    println!("Local sources need no logout.");
    return Ok(());
  }

  let token = saved_session(config)?.and_then(|session| session.token);
  let identity = HttpIdentity::new(config.client_config())?.with_token(token);
  let mut catalog = open_catalog(config)?;
  if catalog.user().is_some() {
    catalog.sign_out(&identity).await?;
  }

  if session::clear(&config.session_file)? {
    println!("{} Signed out", "✓".green());
  } else {
    println!("Not signed in.");
  }
  Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
  let catalog = open_catalog(config)?;
  match catalog.user() {
    Some(user) => display_user(user),
    None => println!("Not signed in."),
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn config(source: Source, temp: &TempDir) -> Config {
    Config { source, ..Config::defaults(temp.path()) }
  }

  #[tokio::test]
  async fn test_local_sources_run_as_operator() {
    let temp = TempDir::new().unwrap();
    for source in [Source::Demo, Source::File] {
      let catalog = open_catalog(&config(source, &temp)).unwrap();
      assert!(catalog.state().auth.is_admin);
    }
  }

  #[tokio::test]
  async fn test_remote_without_session_is_signed_out() {
    let temp = TempDir::new().unwrap();
    let catalog = open_catalog(&config(Source::Remote, &temp)).unwrap();
    assert_eq!(catalog.user(), None);
    assert!(!catalog.state().auth.loading);
  }

  #[tokio::test]
  async fn test_update_requires_a_field() {
    let temp = TempDir::new().unwrap();
    let result = update(&config(Source::Demo, &temp), "1", RecordDraft::default()).await;
    assert!(result.is_err());
  }
}
