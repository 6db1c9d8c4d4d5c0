use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

use crate::db::{DbError, Measurement, PrecipitationReading, TemperatureObservation, TemperatureStats};
use crate::utils::parse_iso_date;

#[derive(Clone)]
pub struct MeasurementRepository {
    pool: SqlitePool,
}

impl MeasurementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Most recent measurement date in the dataset
    #[instrument(skip(self))]
    pub async fn max_date(&self) -> Result<NaiveDate, DbError> {
        debug!("Querying most recent measurement date");

        let latest: Option<String> = sqlx::query_scalar("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        let latest = latest.ok_or(DbError::EmptyDataset)?;
        parse_iso_date(&latest).ok_or_else(|| {
            warn!("Most recent date {:?} is not a valid YYYY-MM-DD date", latest);
            DbError::MalformedDate(latest)
        })
    }

    /// Earliest measurement date, or `None` for an empty dataset
    #[instrument(skip(self))]
    pub async fn min_date(&self) -> Result<Option<String>, DbError> {
        let earliest: Option<String> = sqlx::query_scalar("SELECT MIN(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(earliest)
    }

    /// `(date, prcp)` rows on or after `since`, oldest first.
    ///
    /// Rows sharing a date keep their storage order, so folding them into a map
    /// keeps the last stored row.
    #[instrument(skip(self))]
    pub async fn measurements_since(
        &self,
        since: NaiveDate,
    ) -> Result<Vec<PrecipitationReading>, DbError> {
        debug!("Querying precipitation since {}", since);

        let readings = sqlx::query_as::<_, PrecipitationReading>(
            r#"
            SELECT date, prcp
            FROM measurement
            WHERE date >= ?1
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} precipitation rows", readings.len());
        Ok(readings)
    }

    /// Station with the most measurement rows; ties go to the station seen first.
    #[instrument(skip(self))]
    pub async fn most_active_station(&self) -> Result<String, DbError> {
        debug!("Querying most active station");

        let station: Option<String> = sqlx::query_scalar(
            r#"
            SELECT station
            FROM measurement
            GROUP BY station
            ORDER BY COUNT(*) DESC, MIN(id) ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        station.ok_or(DbError::EmptyDataset)
    }

    #[instrument(skip(self))]
    pub async fn temperature_observations(
        &self,
        station_id: &str,
        since: NaiveDate,
    ) -> Result<Vec<TemperatureObservation>, DbError> {
        debug!("Querying temperature observations for {} since {}", station_id, since);

        let observations = sqlx::query_as::<_, TemperatureObservation>(
            r#"
            SELECT date, tobs AS temperature
            FROM measurement
            WHERE station = ?1 AND date >= ?2
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(station_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        debug!("Found {} temperature observations", observations.len());
        Ok(observations)
    }

    /// Min, max and average of `tobs` over `[from, to]`; open-ended when `to` is `None`.
    #[instrument(skip(self))]
    pub async fn temperature_stats(
        &self,
        from: NaiveDate,
        to: Option<NaiveDate>,
    ) -> Result<TemperatureStats, DbError> {
        debug!("Querying temperature stats from {} to {:?}", from, to);

        let stats = sqlx::query_as::<_, TemperatureStats>(
            r#"
            SELECT MIN(tobs) AS tmin, MAX(tobs) AS tmax, AVG(tobs) AS tavg
            FROM measurement
            WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    #[instrument(skip(self))]
    pub async fn find_latest(&self) -> Result<Option<Measurement>, DbError> {
        let measurement = sqlx::query_as::<_, Measurement>(
            r#"
            SELECT id, station, date, prcp, tobs
            FROM measurement
            ORDER BY date DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(measurement)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
