use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::domain::catalog::ProductListing;

/// Query string for the product listing
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryName {
    pub name: String,
}

/// Welcome message
///
/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to Mall Rats!" }))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// Names of every category
///
/// GET /api/categories/
pub async fn category_names(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryName>>, ApiError> {
    let categories = state.categories.list().await?;

    Ok(Json(
        categories
            .into_iter()
            .map(|category| CategoryName {
                name: category.name,
            })
            .collect(),
    ))
}

/// Products whose category name matches the `category` query parameter
///
/// GET /api/products/?category=<text>
pub async fn products_by_category(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductListing>>, ApiError> {
    let listings = state.listings.find_by_category(&query.category).await?;

    if listings.is_empty() {
        return Err(ApiError::not_found(format!(
            "No products found for category: {}",
            query.category
        )));
    }

    Ok(Json(listings))
}
