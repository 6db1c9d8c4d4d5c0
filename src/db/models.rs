use serde::Serialize;
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

// Dataset entity models
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Measurement {
    pub id: i64,
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// One `(date, prcp)` row of the precipitation query
#[derive(Debug, Clone, FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

// API response DTOs
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, ToSchema)]
pub struct TemperatureObservation {
    #[schema(example = "2017-08-18")]
    pub date: String,
    pub temperature: f64,
}

/// Aggregate temperature statistics; every field is null when no rows matched.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
}

/// Precipitation keyed by date, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PrecipitationByDate(pub BTreeMap<String, Option<f64>>);
