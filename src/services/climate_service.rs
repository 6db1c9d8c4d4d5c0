use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::db::{
    DbError, MeasurementRepository, PrecipitationByDate, PrecipitationReading, StationRepository,
    TemperatureObservation, TemperatureStats,
};

/// Length of the trailing window, as a fixed day count rather than a calendar year
pub const ROLLING_WINDOW_DAYS: i64 = 365;

#[derive(Clone)]
pub struct ClimateService {
    measurement_repo: MeasurementRepository,
    station_repo: StationRepository,
}

impl ClimateService {
    pub fn new(measurement_repo: MeasurementRepository, station_repo: StationRepository) -> Self {
        Self {
            measurement_repo,
            station_repo,
        }
    }

    /// Precipitation per date over the trailing window
    #[instrument(skip(self))]
    pub async fn precipitation_last_year(&self) -> Result<PrecipitationByDate, DbError> {
        let window_start = self.window_start().await?;
        let readings = self.measurement_repo.measurements_since(window_start).await?;
        Ok(Self::fold_by_date(readings))
    }

    pub async fn station_ids(&self) -> Result<Vec<String>, DbError> {
        self.station_repo.all_station_ids().await
    }

    /// Temperature observations of the most active station over the trailing window
    #[instrument(skip(self))]
    pub async fn most_active_station_observations(
        &self,
    ) -> Result<Vec<TemperatureObservation>, DbError> {
        let window_start = self.window_start().await?;
        let station_id = self.measurement_repo.most_active_station().await?;
        debug!("Most active station is {}", station_id);

        self.measurement_repo
            .temperature_observations(&station_id, window_start)
            .await
    }

    pub async fn temperature_stats(
        &self,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> Result<TemperatureStats, DbError> {
        self.measurement_repo.temperature_stats(from, to).await
    }

    async fn window_start(&self) -> Result<NaiveDate, DbError> {
        let most_recent = self.measurement_repo.max_date().await?;
        let start = Self::one_year_window_start(most_recent);
        debug!("Rolling window {} .. {}", start, most_recent);
        Ok(start)
    }

    // Business logic helpers

    /// First date of the trailing window ending at `most_recent`
    pub fn one_year_window_start(most_recent: NaiveDate) -> NaiveDate {
        most_recent - Duration::days(ROLLING_WINDOW_DAYS)
    }

    /// Collapse rows into one value per date; later rows overwrite earlier ones.
    fn fold_by_date(readings: Vec<PrecipitationReading>) -> PrecipitationByDate {
        let mut by_date = BTreeMap::new();
        for reading in readings {
            by_date.insert(reading.date, reading.prcp);
        }
        PrecipitationByDate(by_date)
    }
}
