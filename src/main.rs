use usersapi::{config::Config, db, repositories::SqliteUserRepository, routes, AppState};

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "usersapi=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Database connection
    let pool = db::create_pool(&config).await?;

    // Create the users table
    db::run_migrations(&pool).await?;
    tracing::info!(driver = %config.database_driver, "Database ready");

    let user_repository = Arc::new(SqliteUserRepository::new(pool));
    let app = routes::build_router(AppState::new(user_repository));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
