use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{Entity, NewSubCategory, SubCategory, SubCategoryPatch};
use crate::domain::repositories::errors::RepositoryResult;
use crate::domain::repositories::CatalogRepository;

/// PostgreSQL implementation of `CatalogRepository<SubCategory>`
pub struct PostgresSubCategoryRepository {
    pool: PgPool,
}

impl PostgresSubCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository<SubCategory> for PostgresSubCategoryRepository {
    async fn create(&self, new: NewSubCategory) -> RepositoryResult<SubCategory> {
        let subcategory = sqlx::query_as::<_, SubCategory>(
            r#"
            INSERT INTO subcategories (name, category_id)
            VALUES ($1, $2)
            RETURNING id, name, category_id
            "#,
        )
        .bind(&new.name)
        .bind(new.category_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = subcategory.id, "subcategory created");
        Ok(subcategory)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<SubCategory>> {
        let subcategory = sqlx::query_as::<_, SubCategory>(
            "SELECT id, name, category_id FROM subcategories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subcategory)
    }

    async fn list(&self) -> RepositoryResult<Vec<SubCategory>> {
        let subcategories = sqlx::query_as::<_, SubCategory>(
            "SELECT id, name, category_id FROM subcategories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(subcategories)
    }

    async fn update(
        &self,
        id: i32,
        patch: SubCategoryPatch,
    ) -> RepositoryResult<Option<SubCategory>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, SubCategory>(
            "SELECT id, name, category_id FROM subcategories WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut subcategory) = existing else {
            return Ok(None);
        };
        subcategory.apply(patch);

        let subcategory = sqlx::query_as::<_, SubCategory>(
            r#"
            UPDATE subcategories
            SET name = $1, category_id = $2
            WHERE id = $3
            RETURNING id, name, category_id
            "#,
        )
        .bind(&subcategory.name)
        .bind(subcategory.category_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(subcategory))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM subcategories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
