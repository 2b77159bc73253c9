use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::handlers::catalog::{self, Resource};
use crate::api::handlers::{auth, storefront};
use crate::api::state::AppState;
use crate::domain::catalog::{Brand, Category, Product, SubCategory};

/// CRUD routes for one catalog table, served with and without trailing slash
fn resource_routes<R: Resource>() -> Router<AppState> {
    let collection = format!("{}/", R::PATH);
    let member = format!("{}/:id", R::PATH);

    Router::new()
        .route(R::PATH, get(catalog::list::<R>).post(catalog::create::<R>))
        .route(
            &collection,
            get(catalog::list::<R>).post(catalog::create::<R>),
        )
        .route(
            &member,
            get(catalog::read::<R>)
                .put(catalog::update::<R>)
                .delete(catalog::delete::<R>),
        )
}

/// Builds the application router
///
/// `media_dir` is served read-only under `/media`.
pub fn router(state: AppState, media_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(storefront::root))
        .route("/health", get(storefront::health_check))
        // Storefront
        .route("/api/categories", get(storefront::category_names))
        .route("/api/categories/", get(storefront::category_names))
        .route("/api/products", get(storefront::products_by_category))
        .route("/api/products/", get(storefront::products_by_category))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Catalog CRUD
        .merge(resource_routes::<Category>())
        .merge(resource_routes::<SubCategory>())
        .merge(resource_routes::<Brand>())
        .merge(resource_routes::<Product>())
        .nest_service("/media", ServeDir::new(media_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS policy for the configured browser origins
///
/// Credentials are allowed, which rules out wildcard headers; request
/// headers are mirrored instead.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}
