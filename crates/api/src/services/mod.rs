//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Credential verification and user reconciliation

pub mod auth;
