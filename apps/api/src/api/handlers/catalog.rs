//! Generic CRUD handlers shared by the four catalog tables
//!
//! A table becomes routable by implementing [`Resource`]; the handlers
//! below are instantiated per type in `api::routes`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::JwtAuth;
use crate::api::state::AppState;
use crate::domain::catalog::{Brand, Category, Entity, Product, SubCategory, Validate};
use crate::domain::repositories::CatalogRepository;

/// A catalog entity exposed over HTTP
pub trait Resource: Entity {
    /// Collection path, without trailing slash
    const PATH: &'static str;

    fn repository(state: &AppState) -> Arc<dyn CatalogRepository<Self>>;
}

impl Resource for Category {
    const PATH: &'static str = "/categories";

    fn repository(state: &AppState) -> Arc<dyn CatalogRepository<Self>> {
        state.categories.clone()
    }
}

impl Resource for SubCategory {
    const PATH: &'static str = "/subcategories";

    fn repository(state: &AppState) -> Arc<dyn CatalogRepository<Self>> {
        state.subcategories.clone()
    }
}

impl Resource for Brand {
    const PATH: &'static str = "/brands";

    fn repository(state: &AppState) -> Arc<dyn CatalogRepository<Self>> {
        state.brands.clone()
    }
}

impl Resource for Product {
    const PATH: &'static str = "/products";

    fn repository(state: &AppState) -> Arc<dyn CatalogRepository<Self>> {
        state.products.clone()
    }
}

/// Response from a delete
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

fn not_found<R: Resource>(id: i32) -> ApiError {
    ApiError::not_found(format!("{} with id {} not found", R::NAME, id))
}

/// Create a row
///
/// POST /{resource}/
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
    Json(payload): Json<R::New>,
) -> Result<(StatusCode, Json<R>), ApiError> {
    payload.validate().map_err(ApiError::bad_request)?;

    let created = R::repository(&state).create(payload).await?;
    tracing::info!(%user_id, id = created.id(), "{} created", R::NAME);

    Ok((StatusCode::CREATED, Json(created)))
}

/// List all rows
///
/// GET /{resource}/
pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Vec<R>>, ApiError> {
    let rows = R::repository(&state).list().await?;
    Ok(Json(rows))
}

/// Get a row by id
///
/// GET /{resource}/:id
pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<R>, ApiError> {
    R::repository(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found::<R>(id))
}

/// Merge the provided fields into a row
///
/// PUT /{resource}/:id
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
    Path(id): Path<i32>,
    Json(patch): Json<R::Patch>,
) -> Result<Json<R>, ApiError> {
    patch.validate().map_err(ApiError::bad_request)?;

    let updated = R::repository(&state)
        .update(id, patch)
        .await?
        .ok_or_else(|| not_found::<R>(id))?;
    tracing::info!(%user_id, id, "{} updated", R::NAME);

    Ok(Json(updated))
}

/// Delete a row; succeeds whether or not the row existed
///
/// DELETE /{resource}/:id
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let removed = R::repository(&state).delete(id).await?;
    if removed {
        tracing::info!(%user_id, id, "{} deleted", R::NAME);
    }

    Ok(Json(DeleteResponse { ok: true }))
}
