//! Output attributes of an alert rule lookup
//!
//! Attribute names and types are consumed by existing configuration code and
//! must stay exactly as declared here.

use serde::{Deserialize, Serialize};

use super::AlertRule;

/// Flat projection of a resolved [`AlertRule`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRuleAttributes {
    /// Decimal string form of `rule_id`
    pub id: String,
    pub rule_id: i64,
    pub rule_name: String,
    pub expression: String,
    /// `TO_TARGET`, `FROM_TARGET`, `BIDIRECTIONAL`, or empty
    pub direction: String,
    pub notify_on_clear: i64,
    pub default: i64,
    pub alert_type: String,
    pub minimum_sources: i64,
    pub minimum_sources_pct: i64,
    pub rounds_violating_out_of: i64,
    pub rounds_violating_required: i64,
    /// `ANY`, `EXACT`, or empty
    pub rounds_violating_mode: String,
}

/// Project a resolved alert rule onto the output attribute set
pub fn project(record: &AlertRule) -> AlertRuleAttributes {
    AlertRuleAttributes {
        id: record.rule_id.to_string(),
        rule_id: record.rule_id,
        rule_name: record.rule_name.clone(),
        expression: record.expression.clone(),
        direction: record
            .direction
            .map(|d| d.as_str().to_string())
            .unwrap_or_default(),
        notify_on_clear: record.notify_on_clear,
        default: record.default,
        alert_type: record.alert_type.clone(),
        minimum_sources: record.minimum_sources,
        minimum_sources_pct: record.minimum_sources_pct,
        rounds_violating_out_of: record.rounds_violating_out_of,
        rounds_violating_required: record.rounds_violating_required,
        rounds_violating_mode: record
            .rounds_violating_mode
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    }
}

impl From<&AlertRule> for AlertRuleAttributes {
    fn from(record: &AlertRule) -> Self {
        project(record)
    }
}

impl From<AlertRule> for AlertRuleAttributes {
    fn from(record: AlertRule) -> Self {
        project(&record)
    }
}
