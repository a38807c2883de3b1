use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::DomainError;

/// OAuth scope granting read/write access to Firestore.
pub const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: u64 = 3600;
/// Refresh cached tokens this long before they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Supplies bearer tokens for Firestore requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, DomainError>;
}

/// A fixed token: an externally minted access token, or `owner` for the emulator.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The emulator accepts `Bearer owner` and bypasses security rules.
    pub fn emulator() -> Self {
        Self::new("owner")
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String, DomainError> {
        Ok(self.token.clone())
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The parts of a service account key file this service uses.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub project_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::config(format!("credentials are not valid JSON: {}", e)))
    }

    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::config(format!(
                "cannot read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&raw)
    }

    /// Inline JSON (deploy mode) takes precedence over the key file (local mode).
    pub fn load(inline_json: Option<&str>, path: &Path) -> Result<Self, DomainError> {
        match inline_json {
            Some(json) if !json.trim().is_empty() => {
                debug!("Using inline service account credentials");
                Self::from_json(json)
            }
            _ => {
                debug!("Using service account credentials from {}", path.display());
                Self::from_file(path)
            }
        }
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    token: String,
    refresh_at: Instant,
}

/// Exchanges a signed service-account assertion for an access token and caches it.
pub struct ServiceAccountTokenProvider {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenProvider {
    pub fn new(key: ServiceAccountKey) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| DomainError::config(format!("invalid service account private key: {}", e)))?;

        Ok(Self {
            key,
            encoding_key,
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            cached: Mutex::new(None),
        })
    }

    pub fn project_id(&self) -> &str {
        &self.key.project_id
    }

    fn signed_assertion(&self) -> Result<String, DomainError> {
        let iat = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let claims = Claims {
            iss: &self.key.client_email,
            scope: DATASTORE_SCOPE,
            aud: &self.key.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::auth(format!("failed to sign assertion: {}", e)))
    }

    async fn fetch_token(&self) -> Result<CachedToken, DomainError> {
        let assertion = self.signed_assertion()?;

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| DomainError::auth(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Token endpoint returned {}: {}", status, body);
            return Err(DomainError::auth(format!(
                "token endpoint returned {}",
                status
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| DomainError::auth(format!("failed to parse token response: {}", e)))?;

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS));
        debug!(
            "Obtained access token for {} valid for {:?}",
            self.key.client_email, lifetime
        );

        Ok(CachedToken {
            token: token.access_token,
            refresh_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        })
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String, DomainError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.fetch_token().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);
        Ok(token)
    }
}
