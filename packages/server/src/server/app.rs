//! Application setup and server configuration.

use std::sync::Arc;

use axum::extract::Extension;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::TokenVerifier;
use crate::kernel::BaseDrinkStore;
use crate::server::middleware::require_permission;
use crate::server::routes::{
    create_drink, delete_drink, get_drinks, get_drinks_detail, health_handler, update_drink,
};

/// Shared application state
///
/// Constructed once at startup and injected into handlers; the store and
/// verifier sit behind trait objects so tests swap in doubles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BaseDrinkStore>,
    pub verifier: Arc<TokenVerifier>,
}

/// Build the Axum application router
///
/// Every /drinks route is wrapped with the permission it requires; auth
/// failures short-circuit before the handler runs. The health check is the
/// only unauthenticated route.
pub fn build_app(state: AppState) -> Router {
    let verifier = state.verifier.clone();
    let guard = move |permission: &'static str| {
        let verifier = verifier.clone();
        middleware::from_fn(move |req, next| {
            require_permission(verifier.clone(), permission, req, next)
        })
    };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route(
            "/drinks",
            get(get_drinks)
                .route_layer(guard("get:drinks"))
                .merge(post(create_drink).route_layer(guard("post:drinks"))),
        )
        .route(
            "/drinks-detail",
            get(get_drinks_detail).route_layer(guard("get:drinks-detail")),
        )
        .route(
            "/drinks/:drink_id",
            patch(update_drink)
                .route_layer(guard("patch:drinks"))
                .merge(delete(delete_drink).route_layer(guard("delete:drinks"))),
        )
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
