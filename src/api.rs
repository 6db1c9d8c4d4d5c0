use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use utoipa::{OpenApi, ToSchema};

use crate::db::{DbError, PrecipitationByDate, TemperatureObservation, TemperatureStats};
use crate::services::ClimateService;
use crate::utils::parse_iso_date;

pub const INVALID_START_DATE_MESSAGE: &str = "Invalid start date format. Use YYYY-MM-DD.";
pub const INVALID_DATE_MESSAGE: &str = "Invalid date format. Use YYYY-MM-DD.";

const WELCOME_MESSAGE: &str = "Welcome to the Hawaii Climate API!<br/>\
Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/&lt;start&gt;<br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>";

#[derive(Clone)]
pub struct AppState {
    pub climate_service: ClimateService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors a handler can surface to the client
#[derive(Debug)]
pub enum ApiError {
    InvalidStartDate,
    InvalidDateRange,
    Database(DbError),
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::Database(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidStartDate => (StatusCode::BAD_REQUEST, INVALID_START_DATE_MESSAGE),
            ApiError::InvalidDateRange => (StatusCode::BAD_REQUEST, INVALID_DATE_MESSAGE),
            ApiError::Database(DbError::EmptyDataset) => {
                error!("Query requires measurements but the dataset has none");
                (StatusCode::INTERNAL_SERVER_ERROR, "No measurements available.")
            }
            ApiError::Database(e) => {
                error!("Database query failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        };

        let body = ErrorResponse {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        welcome,
        health,
        get_precipitation,
        get_stations,
        get_tobs,
        get_stats_from,
        get_stats_range
    ),
    components(schemas(
        TemperatureObservation,
        TemperatureStats,
        PrecipitationByDate,
        ErrorResponse,
        HealthResponse
    )),
    tags((name = "climate", description = "Hawaii climate observations"))
)]
pub struct ApiDoc;

pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/precipitation", get(get_precipitation))
        .route("/stations", get(get_stations))
        .route("/tobs", get(get_tobs))
        .route("/{start}", get(get_stats_from))
        .route("/{start}/{end}", get(get_stats_range))
        .with_state(state);

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1.0", api_routes)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "climate",
    responses((status = 200, description = "Welcome message listing the routes", body = String, content_type = "text/html"))
)]
async fn welcome() -> Html<&'static str> {
    Html(WELCOME_MESSAGE)
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "climate",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
async fn health() -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
    };
    (StatusCode::OK, Json(response))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(generate_openapi_spec())
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    tag = "climate",
    responses(
        (status = 200, description = "Precipitation by date over the last 365 days of data", body = PrecipitationByDate),
        (status = 500, description = "Dataset is empty or unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_precipitation(
    State(state): State<AppState>,
) -> Result<Json<PrecipitationByDate>, ApiError> {
    debug!("Fetching precipitation for the trailing window");
    let precipitation = state.climate_service.precipitation_last_year().await?;

    info!("Retrieved precipitation for {} dates", precipitation.0.len());
    Ok(Json(precipitation))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    tag = "climate",
    responses((status = 200, description = "All station codes", body = [String]))
)]
#[instrument(skip(state))]
async fn get_stations(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    debug!("Fetching station list");
    let stations = state.climate_service.station_ids().await?;

    info!("Retrieved {} stations", stations.len());
    Ok(Json(stations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    tag = "climate",
    responses(
        (status = 200, description = "Last 365 days of temperature observations for the most active station", body = [TemperatureObservation]),
        (status = 500, description = "Dataset is empty or unreadable", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_tobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, ApiError> {
    debug!("Fetching temperature observations for the most active station");
    let observations = state
        .climate_service
        .most_active_station_observations()
        .await?;

    info!("Retrieved {} temperature observations", observations.len());
    Ok(Json(observations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    tag = "climate",
    params(("start" = String, Path, description = "Inclusive start date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Temperature statistics from the start date onward", body = TemperatureStats),
        (status = 400, description = "Malformed start date", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start))]
async fn get_stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let Some(start_date) = parse_iso_date(&start) else {
        warn!("Rejected malformed start date {:?}", start);
        return Err(ApiError::InvalidStartDate);
    };

    let stats = state
        .climate_service
        .temperature_stats(start_date, None)
        .await?;

    info!("Computed temperature stats from {}: {:?}", start_date, stats);
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    tag = "climate",
    params(
        ("start" = String, Path, description = "Inclusive start date, YYYY-MM-DD"),
        ("end" = String, Path, description = "Inclusive end date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Temperature statistics between the two dates", body = TemperatureStats),
        (status = 400, description = "Malformed start or end date", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(start = %start, end = %end))]
async fn get_stats_range(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ApiError> {
    let (Some(start_date), Some(end_date)) = (parse_iso_date(&start), parse_iso_date(&end)) else {
        warn!("Rejected malformed date range {:?} .. {:?}", start, end);
        return Err(ApiError::InvalidDateRange);
    };

    let stats = state
        .climate_service
        .temperature_stats(start_date, Some(end_date))
        .await?;

    info!(
        "Computed temperature stats from {} to {}: {:?}",
        start_date, end_date, stats
    );
    Ok(Json(stats))
}
