//! ThousandEyes alert rule model
//!
//! Mirrors the records returned by the ThousandEyes `/alert-rules` endpoint.
//! Only the fields exposed to configuration tooling are decoded; any other
//! keys in the payload are ignored.

use serde::{
    de::{value::StringDeserializer, IntoDeserializer},
    Deserialize, Deserializer, Serialize,
};

// ============================================================================
// Enums
// ============================================================================

/// Traffic direction an alert rule applies to
///
/// Only meaningful for some alert types (path trace, end-to-end agent tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    ToTarget,
    FromTarget,
    Bidirectional,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ToTarget => "TO_TARGET",
            Direction::FromTarget => "FROM_TARGET",
            Direction::Bidirectional => "BIDIRECTIONAL",
        }
    }
}

/// How repeated violations are counted for "X of Y rounds" conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundsViolatingMode {
    /// Any sources may violate across the rounds
    Any,
    /// The same source must violate in every counted round
    Exact,
}

impl RoundsViolatingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundsViolatingMode::Any => "ANY",
            RoundsViolatingMode::Exact => "EXACT",
        }
    }
}

// ============================================================================
// Alert rule
// ============================================================================

/// A single alert rule as stored by ThousandEyes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRule {
    pub rule_id: i64,
    pub rule_name: String,
    /// Serialized trigger condition
    #[serde(default)]
    pub expression: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub direction: Option<Direction>,
    /// 1 to send a notification when the alert clears
    #[serde(default)]
    pub notify_on_clear: i64,
    /// 1 when this rule is the default for its alert type
    #[serde(default)]
    pub default: i64,
    #[serde(default)]
    pub alert_type: String,
    #[serde(default)]
    pub minimum_sources: i64,
    #[serde(default)]
    pub minimum_sources_pct: i64,
    #[serde(default)]
    pub rounds_violating_out_of: i64,
    #[serde(default)]
    pub rounds_violating_required: i64,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub rounds_violating_mode: Option<RoundsViolatingMode>,
}

/// Decode an optional enumerated string, treating `null` and `""` as absent
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) if !value.trim().is_empty() => {
            let inner: StringDeserializer<D::Error> = value.trim().to_string().into_deserializer();
            T::deserialize(inner).map(Some)
        }
        _ => Ok(None),
    }
}
