// Repository interfaces (ports)
// Implemented by the infrastructure layer

pub mod catalog_repository;
pub mod errors;
pub mod user_repository;

pub use catalog_repository::{CatalogRepository, ListingRepository};
pub use errors::RepositoryError;
pub use user_repository::{User, UserRepository};
