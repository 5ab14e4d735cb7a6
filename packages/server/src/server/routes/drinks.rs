use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::common::ApiError;
use crate::domains::drinks::{Drink, DrinkChanges, DrinkLong, DrinkShort, NewDrink};
use crate::server::app::AppState;

/// Collection envelope returned by the listing and mutation routes
///
/// Create and update intentionally return the entire collection rather than
/// the affected record; clients use the response to refresh their menu in a
/// single round trip.
#[derive(Serialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i64,
}

/// GET /drinks - short representation
pub async fn get_drinks(
    Extension(state): Extension<AppState>,
) -> Result<Json<DrinksResponse<DrinkShort>>, ApiError> {
    let drinks = state.store.list().await?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(Drink::short).collect(),
    }))
}

/// GET /drinks-detail - long representation
pub async fn get_drinks_detail(
    Extension(state): Extension<AppState>,
) -> Result<Json<DrinksResponse<DrinkLong>>, ApiError> {
    let drinks = state.store.list().await?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(Drink::long).collect(),
    }))
}

/// POST /drinks - create a drink, then return the whole collection
///
/// A body that does not parse into title + recipe is unprocessable, as is
/// any store failure (duplicate title, constraint violation); either way
/// the transaction leaves the store unchanged.
pub async fn create_drink(
    Extension(state): Extension<AppState>,
    body: Result<Json<NewDrink>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, ApiError> {
    let Json(new_drink) = body.map_err(|_| ApiError::Unprocessable)?;

    state.store.insert(new_drink).await.map_err(|err| {
        warn!(error = %err, "drink insert failed");
        ApiError::Unprocessable
    })?;

    let drinks = state.store.list().await.map_err(|err| {
        warn!(error = %err, "drink listing failed after insert");
        ApiError::Unprocessable
    })?;

    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(Drink::long).collect(),
    }))
}

/// PATCH /drinks/{id} - partial update, then return the whole collection
pub async fn update_drink(
    Extension(state): Extension<AppState>,
    Path(drink_id): Path<i64>,
    body: Result<Json<DrinkChanges>, JsonRejection>,
) -> Result<Json<DrinksResponse<DrinkLong>>, ApiError> {
    let Json(changes) = body.map_err(|_| ApiError::Unprocessable)?;

    // Existence is checked explicitly before the mutation.
    if state.store.find(drink_id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    state
        .store
        .update(drink_id, changes)
        .await?
        .ok_or(ApiError::NotFound)?;

    let drinks = state.store.list().await?;
    Ok(Json(DrinksResponse {
        success: true,
        drinks: drinks.iter().map(Drink::long).collect(),
    }))
}

/// DELETE /drinks/{id}
pub async fn delete_drink(
    Extension(state): Extension<AppState>,
    Path(drink_id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let existing = state.store.find(drink_id).await.map_err(|err| {
        warn!(error = %err, drink_id, "drink lookup failed");
        ApiError::Unprocessable
    })?;
    if existing.is_none() {
        return Err(ApiError::NotFound);
    }

    state.store.delete(drink_id).await.map_err(|err| {
        warn!(error = %err, drink_id, "drink delete failed");
        ApiError::Unprocessable
    })?;

    Ok(Json(DeleteResponse {
        success: true,
        delete: drink_id,
    }))
}
