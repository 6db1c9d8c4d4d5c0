use clap::Parser;
use hawaii_climate_api::api::generate_openapi_spec;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "generate-openapi")]
#[command(about = "Write the OpenAPI document for the climate API", long_about = None)]
struct Cli {
    /// Output file
    #[arg(long, short, default_value = "openapi.json")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let spec = generate_openapi_spec();
    let json = serde_json::to_string_pretty(&spec)?;

    fs::write(&cli.output, json)?;
    println!("Generated {}", cli.output.display());
    Ok(())
}
