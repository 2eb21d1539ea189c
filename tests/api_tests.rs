// HTTP API tests for propmatch, with the backend mocked out.

use actix_web::{test, web, App};
use mockito::Matcher;
use std::sync::Arc;

use propmatch::core::Matcher as PropertyMatcher;
use propmatch::routes::{
    self, handle_json_payload_error,
    matches::{AppState, MatchLimits},
};
use propmatch::services::{SupabaseClient, SupabaseTables};

fn app_state(backend_url: &str) -> AppState {
    let supabase = SupabaseClient::new(
        backend_url.to_string(),
        "test-key".to_string(),
        SupabaseTables {
            leads: "leads".to_string(),
            properties: "properties".to_string(),
        },
    );

    AppState {
        supabase: Arc::new(supabase),
        cache: None,
        matcher: PropertyMatcher::with_default_policy(),
        limits: MatchLimits {
            default: 20,
            max: 100,
        },
    }
}

fn lead_row() -> serde_json::Value {
    serde_json::json!({
        "id": "lead-1",
        "tenant_id": "tenant-1",
        "name": "Ayesha",
        "budget": 500000.0,
        "preferred_property_type": "apartment",
        "preferred_bedrooms": 2
    })
}

fn property_row(id: &str, property_type: &str, price: f64, bedrooms: i32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "tenant_id": "tenant-1",
        "title": format!("Listing {}", id),
        "type": property_type,
        "status": "Available",
        "current_price": price,
        "bedrooms": bedrooms
    })
}

#[actix_web::test]
async fn test_find_matches_end_to_end() {
    let mut server = mockito::Server::new_async().await;

    let lead_mock = server
        .mock("GET", "/rest/v1/leads")
        .match_query(Matcher::UrlEncoded("id".into(), "eq.lead-1".into()))
        .match_header("apikey", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::json!([lead_row()]).to_string())
        .create_async()
        .await;

    let properties_mock = server
        .mock("GET", "/rest/v1/properties")
        .match_query(Matcher::UrlEncoded("tenant_id".into(), "eq.tenant-1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!([
                property_row("p1", "apartment", 480000.0, 2),
                property_row("p2", "villa", 900000.0, 2),
                property_row("p3", "Land", 100000.0, 0),
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(serde_json::json!({ "leadId": "lead-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["lead_id"], "lead-1");
    assert_eq!(body["total_properties"], 3);

    let matches = body["matches"].as_array().expect("matches array");
    // Land is hidden from an apartment seeker; the other two rank with
    // the within-budget apartment first.
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["id"], "p1");
    assert_eq!(matches[0]["matchScore"], 65);
    assert_eq!(matches[0]["isWithinBudget"], true);
    assert_eq!(matches[1]["id"], "p2");
    assert_eq!(matches[1]["isWithinBudget"], false);

    lead_mock.assert_async().await;
    properties_mock.assert_async().await;
}

#[actix_web::test]
async fn test_find_matches_respects_limit() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/rest/v1/leads")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(serde_json::json!([lead_row()]).to_string())
        .create_async()
        .await;

    let rows: Vec<serde_json::Value> = (0..10)
        .map(|i| property_row(&format!("p{}", i), "apartment", 400000.0, 2))
        .collect();
    server
        .mock("GET", "/rest/v1/properties")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(serde_json::json!(rows).to_string())
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(serde_json::json!({ "leadId": "lead-1", "limit": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["matches"].as_array().map(Vec::len), Some(3));
    // total_properties reports the pre-ranking input size, not the page.
    assert_eq!(body["total_properties"], 10);
}

#[actix_web::test]
async fn test_find_matches_unknown_lead_is_404() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/rest/v1/leads")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(serde_json::json!({ "leadId": "missing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Lead not found");
    assert_eq!(body["status_code"], 404);
}

#[actix_web::test]
async fn test_find_matches_blank_lead_id_is_400() {
    // Validation fails before any backend access, so an unroutable
    // backend URL proves no request went out.
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:1")))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(serde_json::json!({ "leadId": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_malformed_json_body_gets_error_envelope() {
    // Same payload error handler the server installs; the body is
    // rejected during extraction, before the route handler or the
    // backend is ever reached.
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:1")))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/score")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"lead\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
    assert_eq!(body["status_code"], 400);
    assert!(body["message"]
        .as_str()
        .is_some_and(|m| m.starts_with("Invalid JSON")));
}

#[actix_web::test]
async fn test_find_matches_backend_failure_is_502_with_error_id() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/rest/v1/leads")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("{\"message\":\"boom\"}")
        .create_async()
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&server.url())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(serde_json::json!({ "leadId": "lead-1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 502);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status_code"], 502);
    assert!(
        body["error_id"].as_str().is_some_and(|id| !id.is_empty()),
        "502 responses carry a correlation id"
    );
}

#[actix_web::test]
async fn test_score_endpoint_needs_no_backend() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:1")))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/score")
        .set_json(serde_json::json!({
            "lead": lead_row(),
            "properties": [
                property_row("p1", "apartment", 480000.0, 2),
                property_row("p2", "office", 5000000.0, 9),
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total_properties"], 2);

    let matches = body["matches"].as_array().expect("matches array");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["id"], "p1");
    assert_eq!(
        matches[0]["matchReasons"],
        serde_json::json!(["Within Budget", "Property Type", "Bedrooms"])
    );
}

#[actix_web::test]
async fn test_health_reports_degraded_when_backend_down() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state("http://127.0.0.1:1")))
            .configure(routes::configure_routes),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
