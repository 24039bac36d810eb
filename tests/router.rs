#![cfg(feature = "web")]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use zest_dashboard::Analytics;
use zest_dashboard::app::{self, AppState};

fn router() -> Router {
    app::router(Arc::new(AppState::new(Analytics::new())), "static")
}

async fn get(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body.to_vec())
}

async fn get_text(uri: &str) -> (StatusCode, String) {
    let (status, _, body) = get(uri).await;
    (status, String::from_utf8(body).unwrap())
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, _, body) = get(uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn index_page() {
    let (status, content_type, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));

    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("ZestMoney Strategic Intelligence Platform"));
    assert!(page.contains("data-tab=\"dashboard\""));
}

#[tokio::test]
async fn tab_fragment() {
    let (status, body) = get_text("/api/tabs/financial").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<div class=\"tab-panel\" data-tab=\"financial\">"));
    assert!(body.contains("data-chart=\"burn-rate\""));
    assert!(body.contains("Burn Rate"));
}

#[tokio::test]
async fn unknown_tab_shows_dashboard() {
    let (status, body) = get_text("/api/tabs/unknown").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("data-tab=\"dashboard\""));
    assert!(body.contains("Strategic Recommendations"));
}

#[tokio::test]
async fn tab_layout_json() {
    let (status, json) = get_json("/api/tabs/risk/layout").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tab"], "risk");
    assert_eq!(json["rows"][0][0]["block"]["kind"], "chart");
    assert_eq!(json["rows"][0][0]["block"]["chart"], "risk-matrix");
    assert_eq!(json["rows"][0][1]["block"]["header"], "Critical Risks");
}

#[tokio::test]
async fn kpis_json() {
    let (status, json) = get_json("/api/kpis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["values"]["peak_valuation"], 435.0);
    assert_eq!(json["cards"].as_array().unwrap().len(), 6);
    assert_eq!(json["cards"][0]["value"], "₹1560Cr");
}

#[tokio::test]
async fn data_json() {
    let (status, json) = get_json("/api/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["funding_data"]["round"][0], "Seed");
    assert_eq!(json["operational_data"]["merchants"][6], 12000);
}

#[tokio::test]
async fn chart_list_and_spec() {
    let (status, json) = get_json("/api/charts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 21);
    assert_eq!(json[0]["id"], "revenue-loss");

    let (status, json) = get_json("/api/charts/funding").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], "funding");
    assert_eq!(json["title"], "Funding Timeline");
    assert_eq!(json["plot"]["series"][0]["mark"], "bar");
}

#[tokio::test]
async fn unknown_chart_is_not_found() {
    let (status, json) = get_json("/api/charts/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], "unknown chart: nope");

    let (status, _, _) = get("/api/charts/nope/svg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chart_size_out_of_range_is_bad_request() {
    let (status, json) = get_json("/api/charts/funding/svg?width=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);

    let (status, _, _) = get("/api/charts/funding/png?height=5000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chart_images() {
    let (status, content_type, body) = get("/api/charts/funding/svg").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
    assert!(String::from_utf8(body).unwrap().contains("<svg"));

    let (status, content_type, body) = get("/api/charts/funding/png?width=300&height=200").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/png"));
    assert!(body.starts_with(b"\x89PNG"));
}

#[tokio::test]
async fn panel_image_links_resolve() {
    let uri = "/api/charts/risk-matrix/svg?height=500&caption=false";
    let (status, content_type, _) = get(uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
}

#[tokio::test]
async fn csv_export() {
    let (status, content_type, body) = get("/api/export/financial").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/csv"));

    let csv = String::from_utf8(body).unwrap();
    assert!(csv.starts_with("year,revenue_cr,"));
    assert_eq!(csv.lines().count(), 8);

    let (status, _, _) = get("/api/export/risk.csv").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_table_is_not_found() {
    let (status, json) = get_json("/api/export/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "unknown table: nope");
}

#[tokio::test]
async fn xlsx_export() {
    let (status, content_type, body) = get("/api/export.xlsx").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().contains("spreadsheetml"));
    assert!(body.starts_with(b"PK"));
}
