use clap::Parser;
use hawaii_climate_api::db::{self, DbError, MeasurementRepository, StationRepository};
use hawaii_climate_api::services::ClimateService;
use hawaii_climate_api::utils::format_iso_date;

#[derive(Parser)]
#[command(name = "dataset-summary")]
#[command(about = "Summarize the climate dataset the API serves", long_about = None)]
struct Cli {
    /// Database connection string
    #[arg(long, env)]
    database_url: String,

    /// Also list every station with its name
    #[arg(long)]
    list_stations: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let pool = db::connect(&cli.database_url, 1).await?;
    db::verify_schema(&pool).await?;

    let station_repo = StationRepository::new(pool.clone());
    let measurement_repo = MeasurementRepository::new(pool.clone());

    println!("Stations:     {}", station_repo.count().await?);
    println!("Measurements: {}", measurement_repo.count().await?);

    let first = measurement_repo.min_date().await?;
    match measurement_repo.max_date().await {
        Ok(last) => {
            println!(
                "Date span:    {} .. {}",
                first.as_deref().unwrap_or("?"),
                last
            );
            println!(
                "Window start: {}",
                format_iso_date(ClimateService::one_year_window_start(last))
            );
        }
        Err(DbError::EmptyDataset) => {
            println!("Date span:    (no measurements)");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let most_active = measurement_repo.most_active_station().await?;
    println!("Most active:  {}", most_active);

    if let Some(latest) = measurement_repo.find_latest().await? {
        println!(
            "Latest row:   {} on {} (prcp {:?}, tobs {})",
            latest.station, latest.date, latest.prcp, latest.tobs
        );
    }

    if cli.list_stations {
        println!("\nStations:");
        for station in station_repo.find_all().await? {
            println!(
                "  {:<12} {}",
                station.station,
                station.name.as_deref().unwrap_or("")
            );
        }
    }

    pool.close().await;
    Ok(())
}
