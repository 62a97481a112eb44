//! Alert rule search criteria

use serde::{
    de::{self, Unexpected, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::fmt;

use crate::utils::error::LookupError;

/// Caller-supplied lookup parameters
///
/// Zero values (`rule_id = 0`, `rule_name = ""`) count as unset, since
/// configuration hosts pass them for optional parameters left blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default, deserialize_with = "empty_as_none_id")]
    pub rule_id: Option<i64>,
    #[serde(default)]
    pub rule_name: Option<String>,
}

impl SearchCriteria {
    pub fn by_id(rule_id: i64) -> Self {
        Self {
            rule_id: Some(rule_id),
            rule_name: None,
        }
    }

    pub fn by_name(rule_name: impl Into<String>) -> Self {
        Self {
            rule_id: None,
            rule_name: Some(rule_name.into()),
        }
    }

    /// Validate that exactly one selector is set and return it
    pub fn selector(&self) -> Result<Selector, LookupError> {
        let rule_id = self.rule_id.filter(|id| *id != 0);
        let rule_name = self.rule_name.as_deref().filter(|name| !name.is_empty());

        match (rule_id, rule_name) {
            (Some(rule_id), Some(rule_name)) => Err(LookupError::AmbiguousCriteria {
                rule_id,
                rule_name: rule_name.to_string(),
            }),
            (None, Some(rule_name)) => Ok(Selector::Name(rule_name.to_string())),
            (Some(rule_id), None) => Ok(Selector::Id(rule_id)),
            (None, None) => Err(LookupError::MissingCriteria),
        }
    }
}

/// Decode a rule ID given either as an integer or as a string
///
/// Query strings carry every value as text, and form hosts send `rule_id=`
/// for a blank field, so an empty string decodes as unset.
fn empty_as_none_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RuleIdVisitor;

    impl<'de> Visitor<'de> for RuleIdVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer rule ID")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            i64::try_from(value)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(RuleIdVisitor)
        }
    }

    deserializer.deserialize_option(RuleIdVisitor)
}

/// A validated, single lookup key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(i64),
    Name(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "rule_id {}", id),
            Selector::Name(name) => write!(f, "rule_name {:?}", name),
        }
    }
}
