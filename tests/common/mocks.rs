//! Mock services for testing
//!
//! Provides a mock alert rule source for isolated testing without the
//! ThousandEyes API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use thousandeyes_alert_rule::{AlertRule, AlertRuleSource};

/// Types of errors the mock can simulate
#[derive(Debug, Clone)]
pub enum MockError {
    /// Connection refused
    ConnectionRefused,
    /// Timeout
    Timeout,
    /// API rejected the token
    Unauthorized,
}

impl std::fmt::Display for MockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MockError::ConnectionRefused => write!(f, "connection refused"),
            MockError::Timeout => write!(f, "operation timed out"),
            MockError::Unauthorized => write!(f, "Request failed with status 401 Unauthorized"),
        }
    }
}

impl std::error::Error for MockError {}

/// Mock alert rule source
#[derive(Clone, Default)]
pub struct MockAlertRuleSource {
    rules: Arc<RwLock<Vec<AlertRule>>>,
    /// Simulate errors when set
    error_mode: Arc<RwLock<Option<MockError>>>,
    fetches: Arc<AtomicUsize>,
}

impl MockAlertRuleSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock pre-loaded with rules, in listing order
    pub fn with_rules(rules: Vec<AlertRule>) -> Self {
        let mock = Self::new();
        mock.add_rules(rules);
        mock
    }

    pub fn add_rule(&self, rule: AlertRule) {
        self.rules.write().unwrap().push(rule);
    }

    pub fn add_rules(&self, rules: Vec<AlertRule>) {
        self.rules.write().unwrap().extend(rules);
    }

    /// Set error mode to simulate failures
    pub fn set_error_mode(&self, error: MockError) {
        *self.error_mode.write().unwrap() = Some(error);
    }

    /// Clear error mode
    pub fn clear_error_mode(&self) {
        *self.error_mode.write().unwrap() = None;
    }

    /// Number of times the listing was requested
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AlertRuleSource for MockAlertRuleSource {
    async fn get_alert_rules(&self) -> anyhow::Result<Vec<AlertRule>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.error_mode.read().unwrap().clone() {
            return Err(anyhow::Error::new(error));
        }
        Ok(self.rules.read().unwrap().clone())
    }
}
