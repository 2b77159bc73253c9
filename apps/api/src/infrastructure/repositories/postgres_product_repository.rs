use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{Entity, NewProduct, Product, ProductListing, ProductPatch};
use crate::domain::repositories::errors::RepositoryResult;
use crate::domain::repositories::{CatalogRepository, ListingRepository};

const PRODUCT_COLUMNS: &str = "id, name, brand_id, subcategory_id, price, description, \
                               image_url, rating_value, rating_count";

/// PostgreSQL implementation of `CatalogRepository<Product>` and the
/// storefront listing query
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository<Product> for PostgresProductRepository {
    async fn create(&self, new: NewProduct) -> RepositoryResult<Product> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (
                name, brand_id, subcategory_id, price, description,
                image_url, rating_value, rating_count
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&new.name)
        .bind(new.brand_id)
        .bind(new.subcategory_id)
        .bind(new.price)
        .bind(&new.description)
        .bind(&new.image_url)
        .bind(new.rating_value)
        .bind(new.rating_count)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = product.id, "product created");
        Ok(product)
    }

    async fn find_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn list(&self) -> RepositoryResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn update(&self, id: i32, patch: ProductPatch) -> RepositoryResult<Option<Product>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(mut product) = existing else {
            return Ok(None);
        };
        product.apply(patch);

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = $1, brand_id = $2, subcategory_id = $3, price = $4,
                description = $5, image_url = $6, rating_value = $7, rating_count = $8
            WHERE id = $9
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(product.brand_id)
        .bind(product.subcategory_id)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image_url)
        .bind(product.rating_value)
        .bind(product.rating_count)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(product))
    }

    async fn delete(&self, id: i32) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ListingRepository for PostgresProductRepository {
    async fn find_by_category(&self, category: &str) -> RepositoryResult<Vec<ProductListing>> {
        let listings = sqlx::query_as::<_, ProductListing>(
            r#"
            SELECT
                p.name, b.name AS brand, p.price, p.description, p.image_url,
                p.rating_value, p.rating_count, c.name AS category_name
            FROM products p
            JOIN brands b ON b.id = p.brand_id
            JOIN subcategories s ON s.id = p.subcategory_id
            JOIN categories c ON c.id = s.category_id
            WHERE c.name ILIKE $1
            ORDER BY p.id
            "#,
        )
        .bind(format!("%{}%", category))
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }
}
