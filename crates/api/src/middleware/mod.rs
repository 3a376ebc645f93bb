//! HTTP middleware stack for the API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS (single configured origin)
//!
//! Authentication is not a layer: gated handlers opt in with the
//! [`RequireAuth`] extractor, so the route table shows at a glance which
//! endpoints need a credential.

pub mod auth;
pub mod request_id;

pub use auth::RequireAuth;
pub use request_id::request_id_middleware;
