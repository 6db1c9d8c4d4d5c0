// Shared fixture dataset for integration tests
// Builds a temp-file SQLite database shaped like the production dataset,
// then reopens it through the read-only pool used by the service.
#![allow(dead_code)]

use hawaii_climate_api::db;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tempfile::TempDir;

pub const STATIONS: &[(&str, &str)] = &[
    ("USC00519397", "WAIKIKI 717.2, HI US"),
    ("USC00513117", "KANEOHE 838.1, HI US"),
    ("USC00519281", "WAIHEE 837.5, HI US"),
    ("USC00516128", "MANOA LYON ARBO 785.2, HI US"),
];

/// (station, date, prcp, tobs) in storage order
pub const MEASUREMENTS: &[(&str, &str, Option<f64>, f64)] = &[
    ("USC00519397", "2016-08-22", Some(0.40), 70.0),
    ("USC00519397", "2016-08-23", Some(0.00), 81.0),
    ("USC00519397", "2017-08-23", Some(0.00), 81.0),
    ("USC00513117", "2016-08-23", Some(0.15), 76.0),
    ("USC00513117", "2017-08-22", None, 75.0),
    ("USC00519281", "2016-08-23", Some(1.79), 77.0),
    ("USC00519281", "2017-01-01", Some(0.02), 62.0),
    ("USC00519281", "2017-08-18", Some(0.06), 79.0),
    ("USC00519281", "2015-01-01", Some(0.10), 56.0),
    ("USC00516128", "2017-08-23", Some(0.45), 76.0),
];

pub const MOST_ACTIVE_STATION: &str = "USC00519281";
pub const MAX_DATE: &str = "2017-08-23";
pub const WINDOW_START: &str = "2016-08-23";

/// Temp directory holding the fixture file; the file is removed on drop
pub struct FixtureDb {
    pub dir: TempDir,
    pub url: String,
}

impl FixtureDb {
    /// Read-only pool over the fixture, opened the way the server opens it
    pub async fn pool(&self) -> SqlitePool {
        db::connect(&self.url, 2)
            .await
            .expect("Failed to open fixture dataset")
    }
}

/// Standard fixture dataset
pub async fn fixture_db() -> FixtureDb {
    build_db(true, STATIONS, MEASUREMENTS).await
}

/// Both tables present, no measurement rows
pub async fn empty_measurements_db() -> FixtureDb {
    build_db(true, STATIONS, &[]).await
}

/// Only the station table exists
pub async fn missing_measurement_table_db() -> FixtureDb {
    build_db(false, STATIONS, &[]).await
}

pub async fn build_db(
    with_measurements: bool,
    stations: &[(&str, &str)],
    measurements: &[(&str, &str, Option<f64>, f64)],
) -> FixtureDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("hawaii.sqlite");
    let url = format!("sqlite:{}", path.display());

    let options = SqliteConnectOptions::from_str(&url)
        .unwrap()
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to create fixture database");

    sqlx::query(
        r#"
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT,
            name TEXT,
            latitude FLOAT,
            longitude FLOAT,
            elevation FLOAT
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    for (code, name) in stations {
        sqlx::query(
            "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, 21.3, -157.8, 3.0)",
        )
        .bind(*code)
        .bind(*name)
        .execute(&pool)
        .await
        .unwrap();
    }

    if with_measurements {
        sqlx::query(
            r#"
            CREATE TABLE measurement (
                id INTEGER PRIMARY KEY,
                station TEXT,
                date TEXT,
                prcp FLOAT,
                tobs FLOAT
            )
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        for (station, date, prcp, tobs) in measurements {
            sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
                .bind(*station)
                .bind(*date)
                .bind(*prcp)
                .bind(*tobs)
                .execute(&pool)
                .await
                .unwrap();
        }
    }

    pool.close().await;

    FixtureDb { dir, url }
}
