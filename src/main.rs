use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hawaii_climate_api::app::Application;
use hawaii_climate_api::config::Config;
use hawaii_climate_api::db;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables (before tracing so RUST_LOG in .env applies)
    dotenvy::dotenv().ok();

    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,hawaii_climate_api=debug")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting Hawaii climate API with config: {:?}", config);

    info!("Opening dataset...");
    let pool = db::connect(&config.database_url, config.max_connections).await?;
    info!("Dataset connection established");

    let application = Application::build(config, pool).await?;
    application.run_until_stopped().await
}
