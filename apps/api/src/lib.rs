//! Mall Rats catalog API
//!
//! CRUD over categories, subcategories, brands and products backed by
//! PostgreSQL, with bearer-token checks on every write.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
