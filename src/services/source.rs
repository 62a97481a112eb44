//! Alert rule source abstraction

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::AlertRule;

/// Supplier of the full alert rule listing
///
/// Implementations return every rule visible to the caller, in the order the
/// remote service lists them. Filtering happens client-side.
#[async_trait]
pub trait AlertRuleSource: Send + Sync {
    async fn get_alert_rules(&self) -> Result<Vec<AlertRule>>;
}

#[async_trait]
impl<T: AlertRuleSource + ?Sized> AlertRuleSource for Arc<T> {
    async fn get_alert_rules(&self) -> Result<Vec<AlertRule>> {
        (**self).get_alert_rules().await
    }
}
