use sqlx::postgres::PgPoolOptions;

use mallrats_api::api::{self, AppState};
use mallrats_api::config::{Config, Storage};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = Config::from_env().expect("Invalid configuration");

    let state = match config.storage {
        Storage::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await
                .expect("Failed to connect to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .expect("Failed to run database migrations");

            tracing::info!("Database connected successfully");
            AppState::postgres(pool, &config.jwt_secret)
        }
        Storage::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");
            AppState::in_memory(&config.jwt_secret)
        }
    };

    let app = api::router(state, &config.media_dir).layer(api::cors_layer(&config.cors_origins));

    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
