// HTTP layer: routes, handlers, request extractors and the error type
// Adapters over the domain repositories

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::{cors_layer, router};
pub use state::AppState;
