use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info, instrument};

use crate::db::DbError;

/// Tables the service reads, with the columns each query relies on
const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("station", &["id", "station"]),
    ("measurement", &["id", "station", "date", "prcp", "tobs"]),
];

/// Open a read-only connection pool over an existing SQLite dataset.
///
/// The file must already exist; nothing is created or migrated.
#[instrument]
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(false)
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    info!("Opened read-only dataset pool ({} max connections)", max_connections);
    Ok(pool)
}

/// Check that the `station` and `measurement` tables exist with the expected columns.
#[instrument(skip(pool))]
pub async fn verify_schema(pool: &SqlitePool) -> Result<(), DbError> {
    for (table, columns) in REQUIRED_SCHEMA {
        debug!("Inspecting columns of table {}", table);

        let present: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info(?1)")
            .bind(*table)
            .fetch_all(pool)
            .await?;

        if present.is_empty() {
            return Err(DbError::MissingTable((*table).to_string()));
        }

        for column in columns.iter() {
            if !present.iter().any(|name| name.eq_ignore_ascii_case(column)) {
                return Err(DbError::MissingColumn {
                    table: (*table).to_string(),
                    column: (*column).to_string(),
                });
            }
        }
    }

    info!("Dataset schema verified");
    Ok(())
}
