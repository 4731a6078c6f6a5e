//! Authentication primitives.
//!
//! - [`identity`] -- the [`IdentityProvider`](identity::IdentityProvider) seam
//!   and its remote and local implementations.
//! - [`jwt`] -- HS256 access-token validation.

pub mod identity;
pub mod jwt;
