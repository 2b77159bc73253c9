use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{Category, CategoryPatch, Entity, NewCategory};
use crate::domain::repositories::errors::RepositoryResult;
use crate::domain::repositories::CatalogRepository;

/// PostgreSQL implementation of `CatalogRepository<Category>`
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository<Category> for PostgresCategoryRepository {
    async fn create(&self, new: NewCategory) -> RepositoryResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, emoji, parent_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, emoji, parent_id
            "#,
        )
        .bind(&new.name)
        .bind(&new.emoji)
        .bind(new.parent_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = category.id, "category created");
        Ok(category)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, emoji, parent_id
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn list(&self) -> RepositoryResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, emoji, parent_id
            FROM categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn update(&self, id: i32, patch: CategoryPatch) -> RepositoryResult<Option<Category>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, emoji, parent_id
            FROM categories
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut category) = existing else {
            return Ok(None);
        };
        category.apply(patch);

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $1, emoji = $2, parent_id = $3
            WHERE id = $4
            RETURNING id, name, emoji, parent_id
            "#,
        )
        .bind(&category.name)
        .bind(&category.emoji)
        .bind(category.parent_id)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(category))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
