//! Request handlers for the drinks API.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};

use barista_core::{Drink, ShortDrink};

use crate::api_types::{CreateDrink, DeleteResponse, DrinksResponse, MenuResponse, UpdateDrink};
use crate::error::ApiError;
use crate::state::AppState;

/// Handler for the public menu. Recipes keep colors and parts only, so the
/// board can be rendered without giving the ingredients away.
pub async fn list_drinks(State(state): State<AppState>) -> Result<Json<MenuResponse>, ApiError> {
    let drinks: Vec<ShortDrink> = state.store().list().await?.iter().map(Drink::short).collect();
    Ok(Json(MenuResponse {
        success: true,
        drinks,
    }))
}

/// Handler for the full menu, ingredient names included.
pub async fn drinks_detail(State(state): State<AppState>) -> Result<Json<DrinksResponse>, ApiError> {
    let drinks = state.store().list().await?;
    Ok(Json(DrinksResponse {
        success: true,
        drinks,
    }))
}

/// Handler for creating a drink. Answers with the stored row, generated id
/// included, wrapped in the usual list envelope.
pub async fn create_drink(
    State(state): State<AppState>,
    body: Result<Json<CreateDrink>, JsonRejection>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let Json(body) = body.map_err(|err| ApiError::Unprocessable(err.to_string()))?;
    let drink = state.store().create(&body.title, &body.recipe).await?;
    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink],
    }))
}

/// Handler for updating a drink. Fields absent from the body keep their
/// stored value; an unknown id answers 404 before the body is even read,
/// whatever the payload looks like.
pub async fn update_drink(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateDrink>, JsonRejection>,
) -> Result<Json<DrinksResponse>, ApiError> {
    let Path(id) = id.map_err(|err| ApiError::BadRequest(err.to_string()))?;
    state.store().fetch(id).await?;
    let Json(body) = body.map_err(|err| ApiError::Unprocessable(err.to_string()))?;
    let drink = state
        .store()
        .update(id, body.title.as_deref(), body.recipe.as_deref())
        .await?;
    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink],
    }))
}

/// Handler for deleting a drink. Answers with the deleted id.
pub async fn delete_drink(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id.map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let delete = state.store().delete(id).await?;
    Ok(Json(DeleteResponse {
        success: true,
        delete,
    }))
}
