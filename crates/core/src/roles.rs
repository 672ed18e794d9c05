//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `admin_users.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_VIEWER: &str = "viewer";

/// All roles an account may hold.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_VIEWER];
