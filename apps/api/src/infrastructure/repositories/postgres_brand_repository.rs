use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{Brand, BrandPatch, Entity, NewBrand};
use crate::domain::repositories::errors::RepositoryResult;
use crate::domain::repositories::CatalogRepository;

/// PostgreSQL implementation of `CatalogRepository<Brand>`
pub struct PostgresBrandRepository {
    pool: PgPool,
}

impl PostgresBrandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository<Brand> for PostgresBrandRepository {
    async fn create(&self, new: NewBrand) -> RepositoryResult<Brand> {
        let brand = sqlx::query_as::<_, Brand>(
            "INSERT INTO brands (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&new.name)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = brand.id, "brand created");
        Ok(brand)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>("SELECT id, name FROM brands WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(brand)
    }

    async fn list(&self) -> RepositoryResult<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>("SELECT id, name FROM brands ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(brands)
    }

    async fn update(&self, id: i32, patch: BrandPatch) -> RepositoryResult<Option<Brand>> {
        let mut tx = self.pool.begin().await?;

        let existing =
            sqlx::query_as::<_, Brand>("SELECT id, name FROM brands WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(mut brand) = existing else {
            return Ok(None);
        };
        brand.apply(patch);

        let brand = sqlx::query_as::<_, Brand>(
            "UPDATE brands SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(&brand.name)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(brand))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
