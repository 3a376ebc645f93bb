//! Integration tests for Donate Bridge.
//!
//! # Running Tests
//!
//! ```bash
//! # Apply migrations, then start the API
//! cargo run -p donate-bridge-cli -- migrate run
//! cargo run -p donate-bridge-api
//!
//! # Run integration tests against it
//! cargo test -p donate-bridge-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `API_BASE_URL` - base URL of the running server
//!   (default `http://localhost:5000`)
//! - `TEST_ID_TOKEN` - a valid Firebase ID token for the test project;
//!   token-dependent tests skip themselves when it is unset

use reqwest::Client;

/// Shared context for tests that talk to a running server.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Build a context from the environment.
    #[must_use]
    pub fn new() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A Firebase ID token for authenticated requests, if the environment
/// provides one.
#[must_use]
pub fn id_token() -> Option<String> {
    std::env::var("TEST_ID_TOKEN").ok().filter(|t| !t.is_empty())
}
