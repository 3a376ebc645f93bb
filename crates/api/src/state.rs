//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::db::PgUserStore;
use crate::identity::{FirebaseTokenVerifier, IdentityVerifier};
use crate::services::auth::AuthService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration. The
/// verifier and the auth service are built once here, so every request
/// shares one JWKS key cache and one pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    verifier: Arc<dyn IdentityVerifier>,
    auth: AuthService<PgUserStore>,
}

impl AppState {
    /// Create a new application state over the production verifier.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let verifier: Arc<dyn IdentityVerifier> =
            Arc::new(FirebaseTokenVerifier::new(&config.firebase));
        Self::with_verifier(config, pool, verifier)
    }

    /// Create a new application state with an injected verifier.
    ///
    /// Tests use this to swap in a verifier pointed at a stub key-set
    /// server or a scripted double.
    #[must_use]
    pub fn with_verifier(
        config: ApiConfig,
        pool: PgPool,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        let auth = AuthService::new(
            Arc::clone(&verifier),
            PgUserStore::new(pool.clone()),
            config.refresh_on_login,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                verifier,
                auth,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the identity verifier.
    #[must_use]
    pub fn verifier(&self) -> &Arc<dyn IdentityVerifier> {
        &self.inner.verifier
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService<PgUserStore> {
        &self.inner.auth
    }
}
