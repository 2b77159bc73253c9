// Infrastructure layer module
// Database adapters for the catalog and user repositories

pub mod repositories;
