//! Payload validation engine.
//!
//! Provides declarative rule types, a pure-logic evaluator and the schemas for
//! every payload shape the public endpoints accept.

pub mod evaluator;
pub mod rules;
pub mod schema;

pub use schema::{validate_payload, REGISTRATION_SCHEMA, TOPIC_SUGGESTION_SCHEMA};
