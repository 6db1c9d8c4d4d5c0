pub mod error;
pub mod measurement_repository;
pub mod models;
pub mod pool;
pub mod station_repository;

pub use error::DbError;
pub use measurement_repository::MeasurementRepository;
pub use models::*;
pub use pool::{connect, verify_schema};
pub use station_repository::StationRepository;
