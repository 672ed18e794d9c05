//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Methods suffixed `_in_tx` take an open
//! transaction instead and are used by [`crate::ingestion`].

pub mod admin_audit_repo;
pub mod admin_user_repo;
pub mod clan_member_repo;
pub mod clan_repo;
pub mod project_repo;
pub mod student_repo;
pub mod submission_repo;

pub use admin_audit_repo::AdminAuditRepo;
pub use admin_user_repo::AdminUserRepo;
pub use clan_member_repo::ClanMemberRepo;
pub use clan_repo::ClanRepo;
pub use project_repo::ProjectRepo;
pub use student_repo::StudentRepo;
pub use submission_repo::SubmissionRepo;
