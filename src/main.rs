use dotenvy::dotenv;
use review_buddy::{
    api::{self, ApiState},
    config::{self, database},
    core::product,
    errors::{Error, Result},
};
use std::{env, net::SocketAddr};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal: env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::app::load_default_config()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!(
        min_grade = app_config.reviews.min_grade,
        max_grade = app_config.reviews.max_grade,
        recalculate_on_retire = app_config.reviews.recalculate_on_retire,
        "Successfully processed application configuration."
    );

    // 4. Initialize database
    let database_url = database::get_database_url();
    database::ensure_sqlite_dir(&database_url)?;
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Seed catalog products (if necessary)
    product::seed_products(&db, &app_config.products)
        .await
        .inspect_err(|e| error!("Failed to seed products: {}", e))?;

    // 6. Serve the API
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .map_err(|e| Error::Config {
            message: format!("Invalid BIND_ADDR: {e}"),
        })?;

    let app = api::router(ApiState::new(db, app_config.reviews));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Review API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
