//! HTTP API Tests
//!
//! Drives the full router over an in-memory store:
//! - listing filter and row cap
//! - distribution totals, ordering and the empty-table case
//! - dashboard header and row cap
//! - liveness while the datastore is down

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use medboard::http_server::{HttpServer, SharedStore};
use medboard::model::{column_names, PatientRecord};
use medboard::store::MemoryPatientStore;

// =============================================================================
// Helper Functions
// =============================================================================

fn record(id: i64, condition: &str) -> PatientRecord {
    let admitted = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    PatientRecord {
        id,
        name: format!("Patient {}", id),
        age: 30 + id % 50,
        gender: if id % 2 == 0 { "Male" } else { "Female" }.to_string(),
        blood_type: "A-".to_string(),
        medical_condition: Some(condition.to_string()),
        date_of_admission: admitted,
        doctor: "Dr. House".to_string(),
        hospital: "Princeton-Plainsboro".to_string(),
        insurance_provider: "Cigna".to_string(),
        billing_amount: 100.0 * id as f64,
        room_number: 200 + id,
        admission_type: "Elective".to_string(),
        discharge_date: NaiveDate::from_ymd_opt(2023, 6, 8).unwrap(),
        medication: "Ibuprofen".to_string(),
        test_results: "Inconclusive".to_string(),
    }
}

fn router_with(records: Vec<PatientRecord>) -> Router {
    let store: SharedStore = Arc::new(MemoryPatientStore::new(records));
    HttpServer::new(store).router()
}

fn three_row_router() -> Router {
    router_with(vec![
        record(1, "Diabetes"),
        record(2, "Diabetes"),
        record(3, "Asthma"),
    ])
}

/// The three-row table plus one row with a NULL condition
fn null_condition_router() -> Router {
    let mut unknown = record(4, "");
    unknown.medical_condition = None;
    router_with(vec![
        record(1, "Diabetes"),
        record(2, "Diabetes"),
        record(3, "Asthma"),
        unknown,
    ])
}

fn down_router() -> Router {
    let store: SharedStore = Arc::new(MemoryPatientStore::unavailable());
    HttpServer::new(store).router()
}

fn conditions(n: i64) -> Vec<PatientRecord> {
    let names = ["Cancer", "Obesity", "Flu", "Arthritis", "Hypertension"];
    (1..=n)
        .map(|id| record(id, names[(id as usize * 7 + id as usize / 3) % names.len()]))
        .collect()
}

async fn get(router: Router, uri: &str) -> (StatusCode, Vec<u8>, Option<String>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec(), content_type)
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body, _) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_ok() {
    let (status, body) = get_json(three_row_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "OK"}));
}

/// Liveness does not depend on the datastore.
#[tokio::test]
async fn test_health_ok_when_datastore_down() {
    let (status, body) = get_json(down_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "OK"}));
}

// =============================================================================
// Patient Listing
// =============================================================================

#[tokio::test]
async fn test_filter_returns_only_matching_condition() {
    let (status, body) = get_json(three_row_router(), "/patients?condition=Asthma").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["medical_condition"], "Asthma");
    assert_eq!(rows[0]["id"], 3);
}

#[tokio::test]
async fn test_filter_is_case_sensitive() {
    let (status, body) = get_json(three_row_router(), "/patients?condition=asthma").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_filter_with_encoded_spaces() {
    let router = router_with(vec![record(1, "Heart Disease"), record(2, "Flu")]);
    let (_, body) = get_json(router, "/patients?condition=Heart%20Disease").await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["medical_condition"], "Heart Disease");
}

#[tokio::test]
async fn test_empty_filter_lists_everything() {
    let (_, body) = get_json(three_row_router(), "/patients?condition=").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

/// Flask semantics: the first of several `condition` values is used.
#[tokio::test]
async fn test_repeated_condition_uses_first_value() {
    let (status, body) =
        get_json(three_row_router(), "/patients?condition=Asthma&condition=Diabetes").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["medical_condition"], "Asthma");
}

#[tokio::test]
async fn test_listing_includes_null_condition() {
    let (status, body) = get_json(null_condition_router(), "/patients").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows[3]["medical_condition"].is_null());
    assert_eq!(rows[3].as_object().unwrap().len(), 16);

    let (_, body) = get_json(null_condition_router(), "/patients?condition=Asthma").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_listing_capped_at_100() {
    let (status, body) = get_json(router_with(conditions(150)), "/patients").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 100);
    let ids: Vec<i64> = rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, (1..=100).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_filtered_listing_capped_at_100() {
    let records: Vec<_> = (1..=120).map(|id| record(id, "Flu")).collect();
    let (_, body) = get_json(router_with(records), "/patients?condition=Flu").await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 100);
    assert!(rows.iter().all(|r| r["medical_condition"] == "Flu"));
}

#[tokio::test]
async fn test_records_carry_every_column() {
    let (_, body) = get_json(three_row_router(), "/patients").await;
    for row in body.as_array().unwrap() {
        let object = row.as_object().unwrap();
        assert_eq!(object.len(), 16);
        for column in column_names() {
            assert!(object.contains_key(column), "missing column {}", column);
        }
    }

    let first = &body[0];
    assert_eq!(first["date_of_admission"], "2023-06-01");
    assert_eq!(first["discharge_date"], "2023-06-08");
    assert_eq!(first["billing_amount"], 100.0);
    assert_eq!(first["room_number"], 201);
}

#[tokio::test]
async fn test_listing_when_datastore_down() {
    let (status, body) = get_json(down_router(), "/patients").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Datastore unavailable");
    assert_eq!(body["code"], 503);
}

// =============================================================================
// Disease Probabilities
// =============================================================================

#[tokio::test]
async fn test_three_row_distribution() {
    let (status, body) = get_json(three_row_router(), "/analytics/disease_probabilities").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["medical_condition"], "Diabetes");
    assert_eq!(rows[0]["count"], 2);
    assert!((rows[0]["probability"].as_f64().unwrap() - 0.6667).abs() < 1e-4);

    assert_eq!(rows[1]["medical_condition"], "Asthma");
    assert_eq!(rows[1]["count"], 1);
    assert!((rows[1]["probability"].as_f64().unwrap() - 0.3333).abs() < 1e-4);
}

#[tokio::test]
async fn test_distribution_invariants() {
    let (_, body) = get_json(router_with(conditions(97)), "/analytics/disease_probabilities").await;
    let rows = body.as_array().unwrap();

    let total: u64 = rows.iter().map(|r| r["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 97);

    let probability: f64 = rows.iter().map(|r| r["probability"].as_f64().unwrap()).sum();
    assert!((probability - 1.0).abs() < 1e-9);

    let counts: Vec<u64> = rows.iter().map(|r| r["count"].as_u64().unwrap()).collect();
    assert!(counts.windows(2).all(|w| w[0] >= w[1]));
}

/// Equal counts are ordered by condition name.
#[tokio::test]
async fn test_distribution_tie_break() {
    let router = router_with(vec![
        record(1, "Obesity"),
        record(2, "Cancer"),
        record(3, "Obesity"),
        record(4, "Cancer"),
    ]);
    let (_, body) = get_json(router, "/analytics/disease_probabilities").await;
    assert_eq!(body[0]["medical_condition"], "Cancer");
    assert_eq!(body[1]["medical_condition"], "Obesity");
    assert_eq!(body[0]["probability"], 0.5);
}

/// Rows with no condition are counted as their own group.
#[tokio::test]
async fn test_distribution_with_null_condition() {
    let (status, body) =
        get_json(null_condition_router(), "/analytics/disease_probabilities").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["medical_condition"], "Diabetes");
    assert_eq!(rows[1]["medical_condition"], "Asthma");
    assert!(rows[2]["medical_condition"].is_null());
    assert_eq!(rows[2]["count"], 1);
    assert_eq!(rows[2]["probability"], 0.25);

    let total: u64 = rows.iter().map(|r| r["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 4);
}

#[tokio::test]
async fn test_empty_table_distribution() {
    let (status, body) = get_json(router_with(Vec::new()), "/analytics/disease_probabilities").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_distribution_when_datastore_down() {
    let (status, body) = get_json(down_router(), "/analytics/disease_probabilities").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_caps_at_50_rows() {
    let (status, body, content_type) = get(router_with(conditions(60)), "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));

    let html = String::from_utf8(body).unwrap();
    assert_eq!(html.matches("<td>").count(), 50 * 16);
    // header row plus 50 data rows
    assert_eq!(html.matches("<tr>").count(), 51);
}

#[tokio::test]
async fn test_dashboard_header_matches_columns() {
    let (_, body, _) = get(three_row_router(), "/dashboard").await;
    let html = String::from_utf8(body).unwrap();

    let header: String = column_names()
        .iter()
        .map(|c| format!("<th>{}</th>", c))
        .collect();
    assert!(html.contains(&header));
    assert_eq!(html.matches("<th>").count(), 16);
}

#[tokio::test]
async fn test_dashboard_empty_table() {
    let (status, body, _) = get(router_with(Vec::new()), "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert_eq!(html.matches("<th>").count(), 16);
    assert_eq!(html.matches("<td>").count(), 0);
}

#[tokio::test]
async fn test_dashboard_null_condition_is_empty_cell() {
    let (status, body, _) = get(null_condition_router(), "/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert_eq!(html.matches("<td>").count(), 4 * 16);
    assert!(html.contains("<td>A-</td><td></td><td>2023-06-01</td>"));
}

#[tokio::test]
async fn test_dashboard_when_datastore_down() {
    let (status, _, _) = get(down_router(), "/dashboard").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
