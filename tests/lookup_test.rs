//! Integration tests for the single-university lookup endpoints.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use campus_catalog::{api, CatalogClient, CatalogConfig};
use httpmock::prelude::*;
use serde_json::json;

const RECORDS_PATH: &str = "/catalog/datasets/us-colleges-and-universities/records";

fn test_server(upstream: &MockServer) -> TestServer {
    let catalog = Arc::new(CatalogClient::new(CatalogConfig {
        base_url: upstream.base_url(),
        dataset: "us-colleges-and-universities".to_string(),
    }));
    TestServer::new(api::router(catalog)).unwrap()
}

#[tokio::test]
async fn test_lookup_by_id_returns_single_record() {
    let upstream = MockServer::start();
    let records_mock = upstream.mock(|when, then| {
        when.method(GET)
            .path(RECORDS_PATH)
            .query_param("limit", "1")
            .query_param("where", "objectid = '42'");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "total_count": 1,
                "results": [{"objectid": "42", "name": "Foo University", "state": "CA"}]
            }));
    });

    let server = test_server(&upstream);
    let response = server.get("/api/universities/42").await;

    records_mock.assert();
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"],
        json!({"name": "Foo University", "objectid": "42", "state": "CA"})
    );
}

#[tokio::test]
async fn test_lookup_by_id_miss_is_404() {
    let upstream = MockServer::start();
    let records_mock = upstream.mock(|when, then| {
        when.method(GET)
            .path(RECORDS_PATH)
            .query_param("where", "objectid = '999999'");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"total_count": 0, "results": []}));
    });

    let server = test_server(&upstream);
    let response = server.get("/api/universities/999999").await;

    records_mock.assert();
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "University not found");
    assert_eq!(body["error"]["status"], 404);
}

#[tokio::test]
async fn test_lookup_by_name_escapes_apostrophes() {
    let upstream = MockServer::start();
    let records_mock = upstream.mock(|when, then| {
        when.method(GET)
            .path(RECORDS_PATH)
            .query_param("limit", "1")
            .query_param("where", "name = 'St. Mary''s College of Maryland'");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "total_count": 1,
                "results": [{"name": "St. Mary's College of Maryland", "state": "MD"}]
            }));
    });

    let server = test_server(&upstream);
    let response = server
        .get("/api/universities/name/St.%20Mary's%20College%20of%20Maryland")
        .await;

    records_mock.assert();
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["name"], "St. Mary's College of Maryland");
}

#[tokio::test]
async fn test_lookup_by_name_miss_is_404() {
    let upstream = MockServer::start();
    upstream.mock(|when, then| {
        when.method(GET).path(RECORDS_PATH);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"total_count": 0, "results": []}));
    });

    let server = test_server(&upstream);
    let response = server.get("/api/universities/name/Nowhere%20University").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["message"], "University not found");
}

#[tokio::test]
async fn test_upstream_rejection_is_mirrored() {
    let upstream = MockServer::start();
    let records_mock = upstream.mock(|when, then| {
        when.method(GET).path(RECORDS_PATH);
        then.status(400)
            .header("Content-Type", "application/json")
            .json_body(json!({"message": "ODSQL query is malformed"}));
    });

    let server = test_server(&upstream);
    let response = server.get("/api/universities/42").await;

    records_mock.assert();
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "ODSQL query is malformed");
    assert_eq!(body["error"]["status"], 400);
}

#[tokio::test]
async fn test_upstream_failure_without_body_is_mirrored_generically() {
    let upstream = MockServer::start();
    let records_mock = upstream.mock(|when, then| {
        when.method(GET).path(RECORDS_PATH);
        then.status(503);
    });

    let server = test_server(&upstream);
    let response = server.get("/api/universities/42").await;

    records_mock.assert();
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["message"], "Catalog request failed");
    assert_eq!(body["error"]["status"], 503);
}

#[tokio::test]
async fn test_unreachable_catalog_is_an_internal_error() {
    // Bind then drop a listener so the request hits a port nothing
    // listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead_addr = listener.local_addr().unwrap();
    drop(listener);

    let catalog = Arc::new(CatalogClient::new(CatalogConfig {
        base_url: format!("http://{}", dead_addr),
        dataset: "us-colleges-and-universities".to_string(),
    }));
    let server = TestServer::new(api::router(catalog)).unwrap();

    let response = server.get("/api/universities/42").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"]["message"],
        "Failed to reach the university catalog"
    );
    assert_eq!(body["error"]["status"], 500);
}
