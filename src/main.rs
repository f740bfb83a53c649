use rusty_shareit_ddd::{
    adapters::clock::SystemClock,
    adapters::mock::{item_catalog::ItemCatalog as MockItemCatalog, user_directory::UserDirectory as MockUserDirectory},
    adapters::postgres::PostgresBookingStore,
    api::{handlers::AppState, router::create_router},
    application::booking::ServiceDependencies,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_shareit_ddd=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection URL
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/shareit".into());

    tracing::info!("Database URL: {}", database_url);

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    // Initialize adapters
    // The user directory and item catalog live in external contexts;
    // mock adapters stand in until those services are wired up.
    let booking_store = Arc::new(PostgresBookingStore::new(pool.clone()));
    let user_directory = Arc::new(MockUserDirectory::new());
    let item_catalog = Arc::new(MockItemCatalog::new());
    let clock = Arc::new(SystemClock);

    // Create service dependencies
    let service_deps = ServiceDependencies {
        booking_store,
        user_directory,
        item_catalog,
        clock,
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    // Server configuration
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    // Start server
    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
