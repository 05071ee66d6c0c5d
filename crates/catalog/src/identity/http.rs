use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{IdentityProvider, User};
use crate::client::{BackendClient, ClientConfig};
use crate::error::Result;

/// Accounts managed by the remote catalog backend.
///
/// A successful sign-in may hand back a session token. It is kept here and
/// sent with sign-out; callers persist it for later record requests.
#[derive(Debug)]
pub struct HttpIdentity {
  client: BackendClient,
  token: RwLock<Option<String>>,
}

#[derive(Serialize)]
struct SignInRequest<'a> {
  email: &'a str,
  password: &'a str,
}

#[derive(Deserialize)]
struct SignInResponse {
  #[serde(flatten)]
  user: User,
  #[serde(default)]
  token: Option<String>,
}

impl HttpIdentity {
  pub fn new(config: ClientConfig) -> Result<Self> {
    Ok(Self { client: BackendClient::with_config(config)?, token: RwLock::new(None) })
  }

  /// Resume a saved sign-in.
  pub fn with_token(self, token: Option<String>) -> Self {
    Self { token: RwLock::new(token), ..self }
  }
}

#[async_trait]
impl IdentityProvider for HttpIdentity {
  async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
    let response: SignInResponse =
      self.client.post_json("/auth/sign-in", &SignInRequest { email, password }).await?;
    if response.token.is_none() {
      warn!("backend issued no session token, record requests will be anonymous");
    }
    *self.token.write().await = response.token;

    let user = response.user;
    info!(uid = %user.uid, role = %user.role, "signed in");
    Ok(user)
  }

  async fn sign_out(&self) -> Result<()> {
    let token = self.token.write().await.take();
    self.client.clone().with_token(token).post_empty("/auth/sign-out").await
  }

  async fn token(&self) -> Option<String> {
    self.token.read().await.clone()
  }
}
