//! Bearer-token validation against the identity service.
//!
//! Two providers implement [`IdentityProvider`]:
//!
//! - [`RemoteIdentity`] asks the auth backend (`GET /auth/v1/user`) using the
//!   public anon key, so it never holds elevated credentials.
//! - [`JwtIdentity`] verifies the token signature locally when the backend's
//!   JWT secret is configured.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::jwt::{validate_token, JwtConfig};

/// Errors from an identity lookup.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The token was not accepted (bad signature, expired, unknown user).
    #[error("Token rejected: {0}")]
    Rejected(String),

    /// The identity service could not be reached.
    #[error("Identity service request failed: {0}")]
    Request(reqwest::Error),

    #[error("Identity service timed out")]
    Timeout,
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IdentityError::Timeout
        } else {
            IdentityError::Request(err)
        }
    }
}

/// Resolves a bearer token to the id of the user it belongs to.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<Uuid, IdentityError>;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which identity provider to build.
#[derive(Debug, Clone)]
pub enum IdentityConfig {
    /// Ask the auth backend at `url` with the public `anon_key`.
    Remote { url: String, anon_key: String },
    /// Verify tokens locally.
    Jwt(JwtConfig),
}

impl IdentityConfig {
    /// Load identity configuration from environment variables.
    ///
    /// | Env Var               | Required                          |
    /// |-----------------------|-----------------------------------|
    /// | `SUPABASE_JWT_SECRET` | no; selects local JWT validation  |
    /// | `SUPABASE_URL`        | yes, unless the secret is set     |
    /// | `SUPABASE_ANON_KEY`   | yes, unless the secret is set     |
    ///
    /// # Panics
    ///
    /// Panics if neither a JWT secret nor the URL/anon-key pair is set.
    pub fn from_env() -> Self {
        if let Ok(secret) = std::env::var("SUPABASE_JWT_SECRET") {
            if !secret.is_empty() {
                return IdentityConfig::Jwt(JwtConfig::new(secret));
            }
        }

        let url = std::env::var("SUPABASE_URL")
            .expect("SUPABASE_URL must be set when SUPABASE_JWT_SECRET is not");
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .expect("SUPABASE_ANON_KEY must be set when SUPABASE_JWT_SECRET is not");

        IdentityConfig::Remote { url, anon_key }
    }

    /// Build the configured provider.
    pub fn build(&self, timeout: Duration) -> Result<Arc<dyn IdentityProvider>, reqwest::Error> {
        Ok(match self {
            IdentityConfig::Remote { url, anon_key } => {
                Arc::new(RemoteIdentity::new(url, anon_key, timeout)?)
            }
            IdentityConfig::Jwt(config) => Arc::new(JwtIdentity::new(config.clone())),
        })
    }
}

// ---------------------------------------------------------------------------
// Remote provider
// ---------------------------------------------------------------------------

/// Subset of the user object returned by the auth backend.
#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: Uuid,
}

/// Validates tokens by asking the auth backend who they belong to.
pub struct RemoteIdentity {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RemoteIdentity {
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentity {
    async fn authenticate(&self, token: &str) -> Result<Uuid, IdentityError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Rejected(format!(
                "identity service returned HTTP {}",
                status.as_u16()
            )));
        }

        let user: RemoteUser = response
            .json()
            .await
            .map_err(|e| IdentityError::Rejected(format!("unexpected user payload: {e}")))?;
        Ok(user.id)
    }
}

// ---------------------------------------------------------------------------
// Local JWT provider
// ---------------------------------------------------------------------------

/// Validates HS256 access tokens in-process.
pub struct JwtIdentity {
    config: JwtConfig,
}

impl JwtIdentity {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentity {
    async fn authenticate(&self, token: &str) -> Result<Uuid, IdentityError> {
        validate_token(token, &self.config)
            .map(|claims| claims.sub)
            .map_err(|e| IdentityError::Rejected(e.to_string()))
    }
}
