//! Typed wrappers for the backend endpoints.
//!
//! Everything here goes through [`AuthenticatedRequestClient::request`] except
//! login and registration, so 401 handling stays in one place.
//!
//! [`AuthenticatedRequestClient::request`]: crate::client::AuthenticatedRequestClient::request

pub mod admin;
pub mod auth;
pub mod timesheets;

pub use timesheets::SubmitOutcome;
