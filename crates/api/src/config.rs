use std::time::Duration;

use certgen_ai::openai::{OpenAiConfig, DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};

use crate::auth::identity::IdentityConfig;

/// Server configuration loaded from environment variables.
///
/// Secrets (provider key, database URL, identity credentials) are read here
/// once and handed to the gateways at construction time.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`; `*` allows any.
    pub cors_origins: Vec<String>,
    /// Whole-request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// Deadline for each outbound call in seconds (default: `30`).
    pub upstream_timeout_secs: u64,
    /// Language and image provider settings.
    pub openai: OpenAiConfig,
    /// Keep the model's opening phrase instead of forcing `"This"`.
    pub keep_model_opening_phrase: bool,
    /// Postgres URL using the elevated (service) credential.
    pub database_url: String,
    /// How bearer tokens are validated.
    pub identity: IdentityConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                                 | Default                     |
    /// |-----------------------------------------|-----------------------------|
    /// | `HOST`                                  | `0.0.0.0`                   |
    /// | `PORT`                                  | `3000`                      |
    /// | `CORS_ORIGINS`                          | `*`                         |
    /// | `REQUEST_TIMEOUT_SECS`                  | `60`                        |
    /// | `UPSTREAM_TIMEOUT_SECS`                 | `30`                        |
    /// | `OPENAI_API_KEY`                        | **required**                |
    /// | `OPENAI_BASE_URL`                       | `https://api.openai.com/v1` |
    /// | `EXTRACTION_MODEL`                      | `gpt-4o-mini`               |
    /// | `IMAGE_MODEL`                           | `dall-e-3`                  |
    /// | `EXTRACTION_KEEP_MODEL_OPENING_PHRASE`  | `false`                     |
    /// | `DATABASE_URL`                          | **required**                |
    ///
    /// Identity variables are documented on [`IdentityConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a value does not parse.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        let api_key =
            std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "OPENAI_API_KEY must not be empty");

        let openai = OpenAiConfig {
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            chat_model: std::env::var("EXTRACTION_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.into()),
            image_model: std::env::var("IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.into()),
            timeout: Duration::from_secs(upstream_timeout_secs),
        };

        let keep_model_opening_phrase: bool = std::env::var("EXTRACTION_KEEP_MODEL_OPENING_PHRASE")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("EXTRACTION_KEEP_MODEL_OPENING_PHRASE must be true or false");

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in the environment");

        let identity = IdentityConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upstream_timeout_secs,
            openai,
            keep_model_opening_phrase,
            database_url,
            identity,
        }
    }

    /// Per-call deadline for outbound requests.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Whether any origin may call the API.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}
