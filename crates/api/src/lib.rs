//! certgen API server library.
//!
//! Exposes the building blocks (config, state, error handling, gateways,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod json;
pub mod middleware;
pub mod records;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
