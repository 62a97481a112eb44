//! ThousandEyes alert rule lookup
//!
//! This crate resolves a single ThousandEyes alert rule by ID or by name and
//! projects it onto a flat attribute set for configuration tooling.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use models::{AlertRule, AlertRuleAttributes, SearchCriteria};
pub use services::AlertRuleSource;
pub use utils::error::LookupError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Alert rule listing provider
    pub source: Arc<dyn AlertRuleSource>,
}
