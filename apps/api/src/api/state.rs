use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::catalog::{Brand, Category, Product, SubCategory};
use crate::domain::repositories::{CatalogRepository, ListingRepository, UserRepository};
use crate::infrastructure::repositories::{
    InMemoryCatalog, InMemoryUserRepository, PostgresBrandRepository,
    PostgresCategoryRepository, PostgresProductRepository, PostgresSubCategoryRepository,
    PostgresUserRepository,
};

/// Shared handler state: one repository per table plus the token secret
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CatalogRepository<Category>>,
    pub subcategories: Arc<dyn CatalogRepository<SubCategory>>,
    pub brands: Arc<dyn CatalogRepository<Brand>>,
    pub products: Arc<dyn CatalogRepository<Product>>,
    pub listings: Arc<dyn ListingRepository>,
    pub users: Arc<dyn UserRepository>,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    /// State backed by PostgreSQL; every repository shares the pool
    pub fn postgres(pool: PgPool, jwt_secret: &str) -> Self {
        let products = Arc::new(PostgresProductRepository::new(pool.clone()));
        Self {
            categories: Arc::new(PostgresCategoryRepository::new(pool.clone())),
            subcategories: Arc::new(PostgresSubCategoryRepository::new(pool.clone())),
            brands: Arc::new(PostgresBrandRepository::new(pool.clone())),
            products: products.clone(),
            listings: products,
            users: Arc::new(PostgresUserRepository::new(pool)),
            jwt_secret: Arc::from(jwt_secret),
        }
    }

    /// State backed by a fresh in-process store
    pub fn in_memory(jwt_secret: &str) -> Self {
        let catalog = Arc::new(InMemoryCatalog::new());
        Self {
            categories: catalog.clone(),
            subcategories: catalog.clone(),
            brands: catalog.clone(),
            products: catalog.clone(),
            listings: catalog,
            users: Arc::new(InMemoryUserRepository::new()),
            jwt_secret: Arc::from(jwt_secret),
        }
    }
}
