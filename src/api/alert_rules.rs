//! Alert rule lookup endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};

use crate::{
    models::{AlertRuleAttributes, SearchCriteria},
    services::resolver,
    utils::error::{LookupError, LookupResult},
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/lookup", get(lookup_alert_rule))
}

/// Look up one alert rule by `rule_id` or `rule_name`
///
/// GET /api/v1/alert-rules/lookup?rule_id=101
/// GET /api/v1/alert-rules/lookup?rule_name=cpu-high
pub async fn lookup_alert_rule(
    State(state): State<AppState>,
    query: Result<Query<SearchCriteria>, QueryRejection>,
) -> LookupResult<Json<AlertRuleAttributes>> {
    let Query(criteria) =
        query.map_err(|rejection| LookupError::InvalidCriteria(rejection.body_text()))?;
    let attributes = resolver::lookup(&criteria, state.source.as_ref()).await?;
    Ok(Json(attributes))
}
