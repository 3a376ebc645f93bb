//! Domain types for the donate-bridge API.

pub mod donation;
pub mod profile;
pub mod user;

pub use donation::Donation;
pub use profile::Profile;
pub use user::User;
