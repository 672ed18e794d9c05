//! Delivery channels for submission notices.

pub mod email;

pub use email::{EmailConfig, EmailDelivery, EmailError};
