//! Request extractors enforcing access rules.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rate_limit::PublicClient`] -- Identifies an anonymous caller and
//!   enforces the per-address submission quota.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
