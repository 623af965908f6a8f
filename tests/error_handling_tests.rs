//! Fallbacks, malformed bodies and the shared error body shape

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use grubdash::prelude::*;
use serde_json::{Value, json};

fn create_test_server() -> TestServer {
    TestServer::try_new(ServerBuilder::new().build()).expect("Failed to create test server")
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let server = create_test_server();

    let response = server.get("/menus").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Path not found: /menus" })
    );
}

#[tokio::test]
async fn test_unsupported_method_is_405() {
    let server = create_test_server();

    let response = server.method(Method::PATCH, "/dishes/abc").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "PATCH not allowed for /dishes/abc" })
    );
}

#[tokio::test]
async fn test_invalid_json_is_400() {
    let server = create_test_server();

    let response = server.post("/dishes").text("{bad").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    let message = body["error"].as_str().expect("error should be a string");
    assert!(message.starts_with("Invalid JSON:"));
}

#[tokio::test]
async fn test_empty_body_reports_first_missing_field() {
    let server = create_test_server();

    let response = server.post("/orders").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Must include a deliverTo."
    );
}

#[tokio::test]
async fn test_non_object_data_treated_as_empty() {
    let server = create_test_server();

    let response = server
        .post("/dishes")
        .json(&json!({ "data": ["Taco"] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Must include a name.");
}

#[tokio::test]
async fn test_wrongly_typed_field_is_400() {
    let server = create_test_server();

    let response = server
        .post("/dishes")
        .json(&json!({
            "data": { "name": 42, "description": "d", "price": 1, "image_url": "u" }
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let message = response.json::<Value>()["error"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    assert!(message.starts_with("Invalid dish data:"));
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    for path in ["/health", "/healthz"] {
        let response = server.get(path).await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "status": "ok", "service": "grubdash" })
        );
    }
}

#[tokio::test]
async fn test_seeded_server_serves_seed_data() {
    let config = GrubDashConfig::from_yaml_str(
        r#"
seed:
  dishes:
    - id: d1
      name: Taco
      description: Spicy
      price: 5
      image_url: http://x
"#,
    )
    .unwrap();
    let app = ServerBuilder::new().with_config(&config).unwrap().build();
    let server = TestServer::try_new(app).unwrap();

    let response = server.get("/dishes/d1").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["name"], "Taco");
}
