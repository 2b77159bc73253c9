// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory_repository;
pub mod postgres_brand_repository;
pub mod postgres_category_repository;
pub mod postgres_product_repository;
pub mod postgres_subcategory_repository;
pub mod postgres_user_repository;

pub use memory_repository::{InMemoryCatalog, InMemoryUserRepository};
pub use postgres_brand_repository::PostgresBrandRepository;
pub use postgres_category_repository::PostgresCategoryRepository;
pub use postgres_product_repository::PostgresProductRepository;
pub use postgres_subcategory_repository::PostgresSubCategoryRepository;
pub use postgres_user_repository::PostgresUserRepository;
