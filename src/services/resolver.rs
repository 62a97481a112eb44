//! Alert rule resolution
//!
//! Selects a single alert rule from the remote listing by ID or by name.
//! The listing is fetched once per call and scanned in order; the first
//! matching record wins.

use tracing::{info, warn};

use super::AlertRuleSource;
use crate::models::{project, AlertRule, AlertRuleAttributes, SearchCriteria, Selector};
use crate::utils::error::{LookupError, LookupResult};

/// Find the first rule matching `selector`, in listing order
///
/// Name matching is exact and case-sensitive.
pub fn find_first<'a>(rules: &'a [AlertRule], selector: &Selector) -> Option<&'a AlertRule> {
    match selector {
        Selector::Name(name) => rules.iter().find(|rule| rule.rule_name == *name),
        Selector::Id(id) => rules.iter().find(|rule| rule.rule_id == *id),
    }
}

/// Resolve a single alert rule from `source`
///
/// Criteria are validated before the source is called. Fetch errors are
/// returned as [`LookupError::FetchFailed`] with the original cause attached.
pub async fn resolve<S>(criteria: &SearchCriteria, source: &S) -> LookupResult<AlertRule>
where
    S: AlertRuleSource + ?Sized,
{
    let result = resolve_inner(criteria, source).await;
    if let Err(ref e) = result {
        warn!(
            error = %e,
            error_type = e.kind(),
            rule_id = ?criteria.rule_id,
            rule_name = ?criteria.rule_name,
            "Alert rule lookup failed"
        );
    }
    result
}

async fn resolve_inner<S>(criteria: &SearchCriteria, source: &S) -> LookupResult<AlertRule>
where
    S: AlertRuleSource + ?Sized,
{
    let selector = criteria.selector()?;
    info!(selector = %selector, "Resolving ThousandEyes alert rule");

    let rules = source
        .get_alert_rules()
        .await
        .map_err(LookupError::FetchFailed)?;

    match find_first(&rules, &selector) {
        Some(rule) => Ok(rule.clone()),
        None => Err(LookupError::NotFound(selector)),
    }
}

/// Resolve an alert rule and project it onto the output attributes
pub async fn lookup<S>(criteria: &SearchCriteria, source: &S) -> LookupResult<AlertRuleAttributes>
where
    S: AlertRuleSource + ?Sized,
{
    resolve(criteria, source).await.map(|rule| project(&rule))
}
