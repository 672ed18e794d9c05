use std::sync::Arc;

use classhopper_events::delivery::EmailDelivery;

use crate::config::ServerConfig;
use crate::middleware::rate_limit::ClientRateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    pub pool: classhopper_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Per-address quota for the public submission endpoints.
    pub rate_limiter: Arc<ClientRateLimiter>,
    /// `None` when SMTP is not configured.
    pub mailer: Option<Arc<EmailDelivery>>,
}
