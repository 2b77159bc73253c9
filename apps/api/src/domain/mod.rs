// Domain layer module exports
// Catalog records, users and the repository ports they are stored through

pub mod catalog;
pub mod repositories;
pub mod user;
