//! HTTP API tests for the alert rule lookup endpoint

use axum::http::StatusCode;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_lookup_by_name_returns_attributes() {
    let app = TestApp::with_source(MockAlertRuleSource::with_rules(AlertRuleFixtures::listing()));

    let response = app.get("/api/v1/alert-rules/lookup?rule_name=latency-high").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "id": "202",
            "rule_id": 202,
            "rule_name": "latency-high",
            "expression": "((latency >= 200 ms))",
            "direction": "BIDIRECTIONAL",
            "notify_on_clear": 0,
            "default": 1,
            "alert_type": "End-to-End (Agent)",
            "minimum_sources": 0,
            "minimum_sources_pct": 25,
            "rounds_violating_out_of": 1,
            "rounds_violating_required": 1,
            "rounds_violating_mode": "ANY"
        })
    );
    assert_eq!(app.source.fetch_count(), 1);
}

#[tokio::test]
async fn test_lookup_by_id_returns_attributes() {
    let app = TestApp::with_source(MockAlertRuleSource::with_rules(AlertRuleFixtures::listing()));

    let response = app.get("/api/v1/alert-rules/lookup?rule_id=101").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], "101");
    assert_eq!(response.body["rule_name"], "cpu-high");
    assert_eq!(response.body["direction"], "");
    assert_eq!(response.body["rounds_violating_mode"], "EXACT");
}

#[tokio::test]
async fn test_lookup_name_with_spaces_is_decoded() {
    let source = MockAlertRuleSource::new();
    let mut rule = AlertRuleFixtures::cpu_high();
    rule.rule_name = "Default Network Alert Rule".to_string();
    source.add_rule(rule);
    let app = TestApp::with_source(source);

    let response = app
        .get("/api/v1/alert-rules/lookup?rule_name=Default%20Network%20Alert%20Rule")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["rule_id"], 101);
}

#[tokio::test]
async fn test_lookup_unknown_id_is_404() {
    let app = TestApp::with_source(MockAlertRuleSource::with_rules(AlertRuleFixtures::listing()));

    let response = app.get("/api/v1/alert-rules/lookup?rule_id=999").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "not_found");
    assert_eq!(response.body["message"], "no alert rule found with rule_id 999");
}

#[tokio::test]
async fn test_lookup_without_criteria_is_400_and_skips_fetch() {
    let app = TestApp::with_source(MockAlertRuleSource::with_rules(AlertRuleFixtures::listing()));

    let response = app.get("/api/v1/alert-rules/lookup").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "missing_criteria");
    assert_eq!(app.source.fetch_count(), 0);
}

#[tokio::test]
async fn test_lookup_with_both_criteria_is_400() {
    let app = TestApp::with_source(MockAlertRuleSource::with_rules(AlertRuleFixtures::listing()));

    let response = app
        .get("/api/v1/alert-rules/lookup?rule_id=101&rule_name=cpu-high")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "ambiguous_criteria");
    assert_eq!(app.source.fetch_count(), 0);
}

#[tokio::test]
async fn test_lookup_fetch_failure_is_502() {
    let source = MockAlertRuleSource::with_rules(AlertRuleFixtures::listing());
    source.set_error_mode(MockError::ConnectionRefused);
    let app = TestApp::with_source(source);

    let response = app.get("/api/v1/alert-rules/lookup?rule_name=cpu-high").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "fetch_failed");
    assert!(response.body["message"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn test_lookup_recovers_after_error_mode_cleared() {
    let source = MockAlertRuleSource::with_rules(AlertRuleFixtures::listing());
    source.set_error_mode(MockError::Timeout);
    let app = TestApp::with_source(source);

    let failed = app.get("/api/v1/alert-rules/lookup?rule_id=202").await;
    assert_eq!(failed.status, StatusCode::BAD_GATEWAY);

    app.source.clear_error_mode();
    let ok = app.get("/api/v1/alert-rules/lookup?rule_id=202").await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(app.source.fetch_count(), 2);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::with_source(MockAlertRuleSource::new());

    let health = app.get("/api/v1/health").await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "healthy");

    let live = app.get("/api/v1/health/live").await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(app.source.fetch_count(), 0);
}

#[tokio::test]
async fn test_lookup_rejected_token_is_not_reported_as_missing_rule() {
    let source = MockAlertRuleSource::with_rules(AlertRuleFixtures::listing());
    source.set_error_mode(MockError::Unauthorized);
    let app = TestApp::with_source(source);

    let response = app.get("/api/v1/alert-rules/lookup?rule_id=999").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_ne!(response.body["error"], "not_found");
}

#[tokio::test]
async fn test_lookup_blank_rule_id_selects_by_name() {
    let app = TestApp::with_source(MockAlertRuleSource::with_rules(AlertRuleFixtures::listing()));

    let response = app
        .get("/api/v1/alert-rules/lookup?rule_id=&rule_name=cpu-high")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], "101");
    assert_eq!(response.body["rule_name"], "cpu-high");
}

#[tokio::test]
async fn test_lookup_non_numeric_rule_id_is_json_400() {
    let app = TestApp::with_source(MockAlertRuleSource::with_rules(AlertRuleFixtures::listing()));

    let response = app.get("/api/v1/alert-rules/lookup?rule_id=abc").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "invalid_criteria");
    let message = response.body["message"].as_str().unwrap();
    assert!(message.contains("rule_id"), "unexpected message: {}", message);
    assert_eq!(app.source.fetch_count(), 0);
}

#[tokio::test]
async fn test_lookup_blank_criteria_is_missing() {
    let app = TestApp::with_source(MockAlertRuleSource::with_rules(AlertRuleFixtures::listing()));

    let response = app.get("/api/v1/alert-rules/lookup?rule_id=&rule_name=").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "missing_criteria");
}
