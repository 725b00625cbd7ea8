//! Bearer credential acquisition and caching
//!
//! [`TokenProvider`] lazily authenticates on first use, caches the token
//! for a fixed TTL and re-authenticates once it expires. The TTL is set
//! locally; any expiry hint from the server is ignored.

use crate::http::read_json;
use crate::{ClientConfig, ClientResult};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Lifetime given to every freshly issued token
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Cached bearer credential
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Usable at `now`: non-empty and strictly before expiry
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.value.is_empty() && now < self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Utc::now())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    email: &'a str,
    key: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Token source for the order service
pub struct TokenProvider {
    http: reqwest::Client,
    token_url: String,
    email: String,
    key: String,
    ttl: TimeDelta,
    cached: Mutex<Option<Credential>>,
}

impl TokenProvider {
    /// Create a provider sharing `http` (which carries the custom header)
    pub fn new(http: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            http,
            token_url: config.token_url.clone(),
            email: config.email.clone(),
            key: config.key.clone(),
            ttl: TimeDelta::hours(DEFAULT_TOKEN_TTL_HOURS),
            cached: Mutex::new(None),
        }
    }

    /// Override the token lifetime
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    /// Return the cached credential, or authenticate if it is missing or stale
    ///
    /// The lock is held across the login request, so concurrent callers
    /// wait for a single refresh instead of each issuing one.
    pub async fn token(&self) -> ClientResult<Credential> {
        let mut guard = self.cached.lock().await;
        if let Some(cached) = guard.as_ref().filter(|c| c.is_valid_at(Utc::now())) {
            debug!(expires_at = %cached.expires_at, "using cached token");
            return Ok(cached.clone());
        }

        let fresh = self.login().await?;
        *guard = Some(fresh.clone());
        Ok(fresh)
    }

    /// Convenience wrapper returning only the token string
    pub async fn token_value(&self) -> ClientResult<String> {
        Ok(self.token().await?.value)
    }

    /// Snapshot of the cached credential, if any
    pub async fn cached(&self) -> Option<Credential> {
        self.cached.lock().await.clone()
    }

    /// Drop the cached credential so the next call re-authenticates
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }

    #[instrument(skip(self), fields(url = %self.token_url))]
    async fn login(&self) -> ClientResult<Credential> {
        info!("Requesting new token");

        let response = self
            .http
            .post(&self.token_url)
            .json(&TokenRequest {
                email: &self.email,
                key: &self.key,
            })
            .send()
            .await?;

        let body: TokenResponse = read_json(&self.token_url, response).await?;
        let credential = Credential::new(body.token, Utc::now() + self.ttl);

        info!(expires_at = %credential.expires_at, "Token issued");
        Ok(credential)
    }
}
