// Common test utilities

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use server_core::domains::auth::TokenVerifier;
use server_core::domains::drinks::Ingredient;
use server_core::kernel::test_dependencies::{
    mint_token, MockDrinkStore, StaticKeySource, TEST_KID, TEST_PRIVATE_KEY_PEM,
    TEST_PUBLIC_KEY_PEM,
};
use server_core::server::{build_app, AppState};

pub const TEST_ISSUER: &str = "https://coffee.test/";
pub const TEST_AUDIENCE: &str = "drinks";

/// Build an app wired to the given mock store
pub fn test_app(store: Arc<MockDrinkStore>) -> Router {
    let key_source = Arc::new(StaticKeySource::new(TEST_KID, TEST_PUBLIC_KEY_PEM));
    let verifier = Arc::new(TokenVerifier::new(TEST_ISSUER, TEST_AUDIENCE, key_source));
    build_app(AppState { store, verifier })
}

/// Mint a valid token carrying the given permissions
pub fn token_with(permissions: &[&str]) -> String {
    mint_token(
        TEST_KID,
        TEST_PRIVATE_KEY_PEM,
        TEST_ISSUER,
        TEST_AUDIENCE,
        Some(permissions.to_vec()),
        3600,
    )
}

/// Mint a valid token that has no permissions claim at all
pub fn token_without_permissions() -> String {
    mint_token(
        TEST_KID,
        TEST_PRIVATE_KEY_PEM,
        TEST_ISSUER,
        TEST_AUDIENCE,
        None,
        3600,
    )
}

pub fn water_recipe() -> Vec<Ingredient> {
    vec![Ingredient {
        name: "Water".to_string(),
        color: "blue".to_string(),
        parts: 1,
    }]
}

/// Issue a request with a bearer token and return (status, parsed JSON body)
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let auth = token.map(|token| format!("Bearer {token}"));
    send_with_auth(app, method, uri, auth.as_deref(), body).await
}

/// Issue a request with a raw Authorization header value
pub async fn send_with_auth(
    app: Router,
    method: Method,
    uri: &str,
    auth_header: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth_header {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
