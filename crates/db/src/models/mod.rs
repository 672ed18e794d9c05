//! Row models and DTOs, one module per table.

pub mod admin_audit;
pub mod admin_user;
pub mod clan;
pub mod clan_member;
pub mod project;
pub mod student;
pub mod submission;
