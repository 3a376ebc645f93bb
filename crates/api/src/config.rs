//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `FIREBASE_PROJECT_ID` - Firebase project id; pins the audience and
//!   issuer of accepted identity tokens
//! - `ALLOWED_ORIGIN` - Exact origin allowed to call this API cross-origin
//!   (e.g., `https://donate-bridge.example.app`)
//!
//! ## Optional
//! - `HOST` - Bind address (default: 127.0.0.1)
//! - `PORT` - Listen port (default: 5000)
//! - `AUTH_REFRESH_ON_LOGIN` - Overwrite stored name/email/avatar from the
//!   fresh claim on repeat login (default: false)
//! - `JWKS_URL` - Override the identity provider's key-set endpoint
//!   (default: Google's secure-token JWKS; overridden in tests)
//! - `JWKS_CACHE_TTL_SECS` - Decoding-key cache lifetime (default: 3600)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `ENVIRONMENT` - Deployment environment name (default: development)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

/// Google's published key set for Firebase ID tokens.
const DEFAULT_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Exact origin allowed for cross-origin requests
    pub allowed_origin: HeaderValue,
    /// Identity provider configuration
    pub firebase: FirebaseConfig,
    /// Overwrite stored claim fields on repeat login
    pub refresh_on_login: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Deployment environment name (development, staging, production)
    pub environment: String,
}

/// Identity provider (Firebase) verification configuration.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Firebase project id; doubles as the required token audience
    pub project_id: String,
    /// Key-set endpoint used to resolve token signing keys
    pub jwks_url: String,
    /// How long resolved decoding keys stay cached
    pub jwks_cache_ttl: Duration,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_required_secret("DATABASE_URL")?;
        let host = get_env_or_default("HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;
        let allowed_origin = parse_origin("ALLOWED_ORIGIN", &get_required_env("ALLOWED_ORIGIN")?)?;
        let firebase = FirebaseConfig::from_env()?;
        let refresh_on_login = get_env_or_default("AUTH_REFRESH_ON_LOGIN", "false")
            .parse::<bool>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("AUTH_REFRESH_ON_LOGIN".to_string(), e.to_string())
            })?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let environment = get_env_or_default("ENVIRONMENT", "development");

        Ok(Self {
            database_url,
            host,
            port,
            allowed_origin,
            firebase,
            refresh_on_login,
            sentry_dsn,
            environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl FirebaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let project_id = get_required_env("FIREBASE_PROJECT_ID")?;
        let jwks_url = get_env_or_default("JWKS_URL", DEFAULT_JWKS_URL);
        let ttl_secs = get_env_or_default("JWKS_CACHE_TTL_SECS", "3600")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("JWKS_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            project_id,
            jwks_url,
            jwks_cache_ttl: Duration::from_secs(ttl_secs),
        })
    }

    /// Issuer every accepted token must carry.
    #[must_use]
    pub fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a configured origin into a header value usable by the CORS layer.
///
/// Rejects values that are not valid header values or that carry a path,
/// since `https://app.example.com/` never matches an `Origin` header.
fn parse_origin(key: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    let url = url::Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.path() != "/" || value.ends_with('/') {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "origin must not include a path or trailing slash".to_string(),
        ));
    }
    HeaderValue::from_str(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
