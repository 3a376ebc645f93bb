//! Core types for Donate Bridge.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod status;
pub mod subject;

pub use email::{Email, EmailError};
pub use id::*;
pub use status::DonationStatus;
pub use subject::{SubjectId, SubjectIdError};
