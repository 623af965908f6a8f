//! HTTP-level tests for the `/dishes` routes
//!
//! Each test builds the full router over in-memory stores and drives it
//! through `axum_test::TestServer`.

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use grubdash::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Helpers
// =============================================================================

fn create_test_server() -> (TestServer, InMemoryStore<Dish>) {
    let dishes = InMemoryStore::new();
    let app = ServerBuilder::new()
        .with_dish_store(dishes.clone())
        .with_order_store(InMemoryStore::new())
        .build();
    let server = TestServer::try_new(app).expect("Failed to create test server");
    (server, dishes)
}

fn taco() -> Value {
    json!({
        "data": {
            "name": "Taco",
            "description": "Spicy",
            "price": 5,
            "image_url": "http://x"
        }
    })
}

async fn create_taco(server: &TestServer) -> Value {
    let response = server.post("/dishes").json(&taco()).await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    body["data"].clone()
}

fn without(field: &str) -> Value {
    let mut body = taco();
    body["data"].as_object_mut().unwrap().remove(field);
    body
}

// =============================================================================
// Create
// =============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_dish() {
        let (server, store) = create_test_server();

        let response = server.post("/dishes").json(&taco()).await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        let data = &body["data"];
        assert_eq!(data["name"], "Taco");
        assert_eq!(data["description"], "Spicy");
        assert_eq!(data["price"], 5);
        assert_eq!(data["image_url"], "http://x");

        let id = data["id"].as_str().expect("id should be a string");
        assert!(!id.is_empty());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_created_ids_are_unique() {
        let (server, _) = create_test_server();

        let mut ids = std::collections::HashSet::new();
        for _ in 0..5 {
            let dish = create_taco(&server).await;
            assert!(ids.insert(dish["id"].as_str().unwrap().to_string()));
        }
    }

    #[tokio::test]
    async fn test_create_requires_each_field() {
        let (server, store) = create_test_server();

        for field in ["name", "description", "price", "image_url"] {
            let response = server.post("/dishes").json(&without(field)).await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let body: Value = response.json();
            assert_eq!(body["error"], format!("Must include a {}.", field));
        }
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_empty_name() {
        let (server, _) = create_test_server();
        let mut body = taco();
        body["data"]["name"] = json!("");

        let response = server.post("/dishes").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Must include a name.");
    }

    #[tokio::test]
    async fn test_create_negative_price() {
        let (server, _) = create_test_server();
        let mut body = taco();
        body["data"]["price"] = json!(-1);

        let response = server.post("/dishes").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Dish price must be an integer greater than zero."
        );
    }

    #[tokio::test]
    async fn test_create_string_price() {
        let (server, _) = create_test_server();
        let mut body = taco();
        body["data"]["price"] = json!("17");

        let response = server.post("/dishes").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            "Dish price must be an integer greater than zero."
        );
    }

    #[tokio::test]
    async fn test_create_non_integer_prices() {
        let (server, _) = create_test_server();

        for price in [json!(2.5), json!(5.0)] {
            let mut body = taco();
            body["data"]["price"] = price.clone();

            let response = server.post("/dishes").json(&body).await;
            response.assert_status(StatusCode::CREATED);
            assert_eq!(response.json::<Value>()["data"]["price"], price);
        }
    }

    #[tokio::test]
    async fn test_create_without_data_envelope() {
        let (server, _) = create_test_server();

        let response = server
            .post("/dishes")
            .json(&json!({ "name": "Taco" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"], "Must include a name.");
    }
}

// =============================================================================
// Read / List
// =============================================================================

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_read_dish() {
        let (server, _) = create_test_server();
        let dish = create_taco(&server).await;
        let id = dish["id"].as_str().unwrap();

        let response = server.get(&format!("/dishes/{}", id)).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], dish);
    }

    #[tokio::test]
    async fn test_read_is_repeatable() {
        let (server, _) = create_test_server();
        let dish = create_taco(&server).await;
        let path = format!("/dishes/{}", dish["id"].as_str().unwrap());

        let first = server.get(&path).await.text();
        let second = server.get(&path).await.text();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_read_missing_dish() {
        let (server, _) = create_test_server();

        let response = server.get("/dishes/does-not-exist").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            response.json::<Value>()["error"],
            "Dish does not exist: does-not-exist."
        );
    }

    #[tokio::test]
    async fn test_list_dishes() {
        let (server, _) = create_test_server();

        let empty = server.get("/dishes").await;
        empty.assert_status_ok();
        assert_eq!(empty.json::<Value>(), json!({ "data": [] }));

        create_taco(&server).await;
        create_taco(&server).await;

        let body: Value = server.get("/dishes").await.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_dishes_filtered_by_id() {
        let (server, _) = create_test_server();
        let dish = create_taco(&server).await;
        create_taco(&server).await;

        let response = server
            .get("/dishes")
            .add_query_param("id", dish["id"].as_str().unwrap())
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], json!([dish]));
    }
}

// =============================================================================
// Update
// =============================================================================

mod update_tests {
    use super::*;

    fn burrito(id: Option<&str>) -> Value {
        let mut data = json!({
            "name": "Burrito",
            "description": "Big",
            "price": 9,
            "image_url": "http://y"
        });
        if let Some(id) = id {
            data["id"] = json!(id);
        }
        json!({ "data": data })
    }

    #[tokio::test]
    async fn test_update_dish() {
        let (server, store) = create_test_server();
        let dish = create_taco(&server).await;
        let id = dish["id"].as_str().unwrap();

        let response = server
            .put(&format!("/dishes/{}", id))
            .json(&burrito(Some(id)))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["id"], id);
        assert_eq!(body["data"]["name"], "Burrito");
        assert_eq!(body["data"]["price"], 9);

        let stored = store.find(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Burrito");
    }

    #[tokio::test]
    async fn test_update_without_payload_id() {
        let (server, _) = create_test_server();
        let dish = create_taco(&server).await;
        let id = dish["id"].as_str().unwrap();

        let response = server
            .put(&format!("/dishes/{}", id))
            .json(&burrito(None))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["id"], id);
    }

    #[tokio::test]
    async fn test_update_id_mismatch() {
        let (server, _) = create_test_server();
        let dish = create_taco(&server).await;
        let id = dish["id"].as_str().unwrap();

        let response = server
            .put(&format!("/dishes/{}", id))
            .json(&burrito(Some("other-id")))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>()["error"],
            format!(
                "Dish id does not match route id. Dish: other-id, Route: {}.",
                id
            )
        );
    }

    #[tokio::test]
    async fn test_update_missing_dish() {
        let (server, _) = create_test_server();

        let response = server.put("/dishes/nope").json(&burrito(None)).await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["error"], "Dish does not exist: nope.");
    }

    #[tokio::test]
    async fn test_update_invalid_price_leaves_dish_unchanged() {
        let (server, store) = create_test_server();
        let dish = create_taco(&server).await;
        let id = dish["id"].as_str().unwrap();

        let mut body = burrito(None);
        body["data"]["price"] = json!(-2);
        let response = server.put(&format!("/dishes/{}", id)).json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let stored = store.find(id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Taco");
        assert_eq!(stored.price.as_u64(), Some(5));
    }
}

// =============================================================================
// Unsupported methods
// =============================================================================

mod method_tests {
    use super::*;

    #[tokio::test]
    async fn test_dishes_cannot_be_deleted() {
        let (server, store) = create_test_server();
        let dish = create_taco(&server).await;
        let id = dish["id"].as_str().unwrap();
        let path = format!("/dishes/{}", id);

        let response = server.delete(&path).await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json::<Value>()["error"],
            format!("DELETE not allowed for {}", path)
        );
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_put_on_collection_not_allowed() {
        let (server, _) = create_test_server();

        let response = server.method(Method::PUT, "/dishes").json(&taco()).await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}
