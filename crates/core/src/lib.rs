//! Domain logic for the Classhopper registration backend.
//!
//! Everything in this crate is free of database and HTTP concerns so it can be
//! shared by the repository layer, the API server and the admin tooling.

pub mod audit;
pub mod error;
pub mod export;
pub mod hashing;
pub mod ingestion;
pub mod moderation;
pub mod registration;
pub mod roles;
pub mod search;
pub mod submission;
pub mod types;
pub mod validation;
