#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),
    #[error("Dataset contains no measurements")]
    EmptyDataset,
    #[error("Stored date is not in YYYY-MM-DD format: {0}")]
    MalformedDate(String),
    #[error("Required table '{0}' not found in dataset")]
    MissingTable(String),
    #[error("Required column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },
}
