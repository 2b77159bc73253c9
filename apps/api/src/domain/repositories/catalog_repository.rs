use async_trait::async_trait;

use super::errors::RepositoryResult;
use crate::domain::catalog::{Entity, ProductListing};

/// Repository trait for one catalog table
///
/// Each call is one unit of work: it checks out a session, runs its
/// statements and commits before returning.
#[async_trait]
pub trait CatalogRepository<E: Entity>: Send + Sync {
    /// Insert a row and return it with its generated id
    async fn create(&self, new: E::New) -> RepositoryResult<E>;

    /// Find a row by its id
    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<E>>;

    /// All rows ordered by id
    async fn list(&self) -> RepositoryResult<Vec<E>>;

    /// Merge a patch into an existing row; `None` when the row is absent
    async fn update(&self, id: i32, patch: E::Patch) -> RepositoryResult<Option<E>>;

    /// Delete a row; returns whether a row was removed
    async fn delete(&self, id: i32) -> RepositoryResult<bool>;
}

/// Storefront read queries spanning several tables
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Products whose category name contains `category`, case-insensitively,
    /// joined with their brand and category names
    async fn find_by_category(&self, category: &str) -> RepositoryResult<Vec<ProductListing>>;
}
