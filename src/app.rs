use sqlx::SqlitePool;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::db::{verify_schema, DbError, MeasurementRepository, StationRepository};
use crate::services::ClimateService;

/// Running HTTP server
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Build the router over an opened dataset and spawn the server
    ///
    /// The dataset schema is checked before anything is bound, so a missing
    /// table or column aborts startup.
    pub async fn build(config: Config, pool: SqlitePool) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        verify_schema(&pool).await?;

        let app_state = build_state(pool);
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        let addr = config.server_addr();
        info!("Starting HTTP server on {}", addr);

        let server_handle = tokio::spawn(async move {
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await
        });

        info!("Application initialized successfully");

        Ok(Self { server_handle })
    }

    /// Run until the server stops (which runs indefinitely unless error)
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}

/// Wire repositories and services over a pool into handler state
pub fn build_state(pool: SqlitePool) -> AppState {
    let measurement_repo = MeasurementRepository::new(pool.clone());
    let station_repo = StationRepository::new(pool);

    AppState {
        climate_service: ClimateService::new(measurement_repo, station_repo),
    }
}

/// Verify the schema and return handler state; used where no server is spawned
pub async fn prepare_state(pool: SqlitePool) -> Result<AppState, DbError> {
    verify_schema(&pool).await?;
    Ok(build_state(pool))
}
