// CRUD contract tests for the /drinks routes, driven through the real
// router with a mock store.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{send, test_app, token_with, water_recipe};
use server_core::kernel::test_dependencies::MockDrinkStore;

#[tokio::test]
async fn get_drinks_on_empty_store_returns_404() {
    let store = Arc::new(MockDrinkStore::new());
    let app = test_app(store);

    let (status, body) = send(app, Method::GET, "/drinks", Some(&token_with(&["get:drinks"])), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
async fn get_drinks_returns_short_representation() {
    let store = Arc::new(MockDrinkStore::new().with_drink("Water", water_recipe()));
    let app = test_app(store);

    let (status, body) = send(app, Method::GET, "/drinks", Some(&token_with(&["get:drinks"])), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["drinks"].as_array().unwrap().len(), 1);
    assert_eq!(body["drinks"][0]["title"], "Water");
    // Short view carries color and parts but never ingredient names.
    assert_eq!(body["drinks"][0]["recipe"][0]["color"], "blue");
    assert_eq!(body["drinks"][0]["recipe"][0]["parts"], 1);
    assert!(body["drinks"][0]["recipe"][0].get("name").is_none());
}

#[tokio::test]
async fn get_drinks_detail_returns_long_representation() {
    let store = Arc::new(MockDrinkStore::new().with_drink("Water", water_recipe()));
    let app = test_app(store);

    let (status, body) = send(
        app,
        Method::GET,
        "/drinks-detail",
        Some(&token_with(&["get:drinks-detail"])),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["recipe"][0]["name"], "Water");
    assert_eq!(body["drinks"][0]["recipe"][0]["color"], "blue");
}

#[tokio::test]
async fn create_drink_returns_full_collection_including_new_entry() {
    let store = Arc::new(MockDrinkStore::new().with_drink("Water", water_recipe()));
    let app = test_app(store);

    let (status, body) = send(
        app,
        Method::POST,
        "/drinks",
        Some(&token_with(&["post:drinks"])),
        Some(json!({
            "title": "Matcha",
            "recipe": [{"name": "Matcha", "color": "green", "parts": 3}],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // The whole collection comes back, long form, with the new entry last.
    let drinks = body["drinks"].as_array().unwrap();
    assert_eq!(drinks.len(), 2);
    assert_eq!(drinks[1]["title"], "Matcha");
    assert_eq!(drinks[1]["recipe"][0]["name"], "Matcha");
    assert_eq!(drinks[1]["recipe"][0]["parts"], 3);
}

#[tokio::test]
async fn create_drink_with_missing_fields_returns_422() {
    let store = Arc::new(MockDrinkStore::new());
    let app = test_app(store.clone());

    let (status, body) = send(
        app,
        Method::POST,
        "/drinks",
        Some(&token_with(&["post:drinks"])),
        Some(json!({"title": "Nameless"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], 422);
    assert_eq!(body["message"], "unprocessable");
    assert!(store.drinks().is_empty());
}

#[tokio::test]
async fn create_drink_store_failure_returns_422() {
    let store = Arc::new(MockDrinkStore::new().failing_writes());
    let app = test_app(store.clone());

    let (status, body) = send(
        app,
        Method::POST,
        "/drinks",
        Some(&token_with(&["post:drinks"])),
        Some(json!({
            "title": "Water",
            "recipe": [{"name": "Water", "color": "blue", "parts": 1}],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "unprocessable");
    assert!(store.drinks().is_empty());
}

#[tokio::test]
async fn update_drink_changes_only_supplied_fields() {
    let store = Arc::new(MockDrinkStore::new().with_drink("Water", water_recipe()));
    let app = test_app(store.clone());

    let (status, body) = send(
        app.clone(),
        Method::PATCH,
        "/drinks/1",
        Some(&token_with(&["patch:drinks"])),
        Some(json!({"title": "Sparkling Water"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], "Sparkling Water");
    // Recipe was not supplied, so it is untouched.
    assert_eq!(body["drinks"][0]["recipe"][0]["name"], "Water");
    assert_eq!(body["drinks"][0]["recipe"][0]["color"], "blue");
    assert_eq!(body["drinks"][0]["recipe"][0]["parts"], 1);

    // A follow-up read reflects exactly the one changed field.
    let (status, body) = send(
        app,
        Method::GET,
        "/drinks-detail",
        Some(&token_with(&["get:drinks-detail"])),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["drinks"][0]["title"], "Sparkling Water");
    assert_eq!(body["drinks"][0]["recipe"][0]["name"], "Water");
}

#[tokio::test]
async fn update_unknown_drink_returns_404() {
    let store = Arc::new(MockDrinkStore::new().with_drink("Water", water_recipe()));
    let app = test_app(store);

    let (status, body) = send(
        app,
        Method::PATCH,
        "/drinks/999",
        Some(&token_with(&["patch:drinks"])),
        Some(json!({"title": "Ghost"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
async fn delete_twice_succeeds_then_returns_404() {
    let store = Arc::new(MockDrinkStore::new().with_drink("Water", water_recipe()));
    let app = test_app(store.clone());
    let token = token_with(&["delete:drinks"]);

    let (status, body) = send(app.clone(), Method::DELETE, "/drinks/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["delete"], 1);
    assert!(store.drinks().is_empty());

    let (status, body) = send(app, Method::DELETE, "/drinks/1", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], 404);
}

#[tokio::test]
async fn delete_store_failure_returns_422() {
    let store = Arc::new(
        MockDrinkStore::new()
            .with_drink("Water", water_recipe())
            .failing_writes(),
    );
    let app = test_app(store.clone());

    let (status, body) = send(
        app,
        Method::DELETE,
        "/drinks/1",
        Some(&token_with(&["delete:drinks"])),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "unprocessable");
    // The failed delete left the row in place.
    assert_eq!(store.drinks().len(), 1);
}

#[tokio::test]
async fn health_check_requires_no_auth() {
    let store = Arc::new(MockDrinkStore::new());
    let app = test_app(store);

    let (status, body) = send(app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"]["status"], "ok");
}
