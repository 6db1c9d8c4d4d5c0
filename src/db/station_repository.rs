use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DbError, Station};

#[derive(Clone)]
pub struct StationRepository {
    pool: SqlitePool,
}

impl StationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All station codes in storage order
    #[instrument(skip(self))]
    pub async fn all_station_ids(&self) -> Result<Vec<String>, DbError> {
        debug!("Querying station codes");

        let ids: Vec<String> = sqlx::query_scalar("SELECT station FROM station ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        debug!("Found {} stations", ids.len());
        Ok(ids)
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Station>, DbError> {
        let stations = sqlx::query_as::<_, Station>(
            r#"
            SELECT id, station, name, latitude, longitude, elevation
            FROM station
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stations)
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<i64, DbError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
