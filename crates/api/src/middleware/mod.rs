//! Authentication extractors.
//!
//! - [`auth::BearerToken`] -- The raw bearer token, if the request carries one.
//! - [`auth::AuthUser`] -- The authenticated caller; rejects with 401 otherwise.

pub mod auth;
