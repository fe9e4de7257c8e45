use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use license_server::config::Config;
use license_server::db::{create_pool, init_db, AppState};
use license_server::handlers;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "license_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    // Create the database pool and initialize the schema. An unreachable
    // store is logged but does not abort startup; requests fail with
    // persistence errors until connectivity is restored.
    let db_pool = create_pool(&config.database_path);
    match db_pool.get() {
        Ok(conn) => {
            if let Err(e) = init_db(&conn) {
                tracing::error!("Failed to initialize database schema: {}", e);
            } else {
                tracing::info!("Database ready at {}", config.database_path);
            }
        }
        Err(e) => {
            tracing::error!("Database unavailable at startup: {}", e);
        }
    }

    let state = AppState { db: db_pool };

    let app = handlers::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("License server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
