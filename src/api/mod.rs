//! API routes and handlers
//!
//! This module defines all API endpoints and their routing.

use axum::{routing::get, Router};

use crate::AppState;

mod alert_rules;
mod health;

pub use alert_rules::lookup_alert_rule;
pub use health::*;

/// API routes, mounted under `/api/v1`
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        // Alert rule lookup
        .nest("/alert-rules", alert_rules::routes())
}

/// Full application router with state applied
pub fn router(state: AppState) -> Router {
    Router::new().nest("/api/v1", routes()).with_state(state)
}
