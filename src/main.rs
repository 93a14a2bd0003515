// @file: placemark_engine/src/main.rs
// @description: CLI entry point wiring the reader, resolver and KML writer.
// @author: LAS.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;

use placemark_engine::connectors::build_geocoder;
use placemark_engine::core::error::{ConvertError, Result};
use placemark_engine::core::models::ColumnSpec;
use placemark_engine::core::reader::RecordReader;
use placemark_engine::core::resolver::{self, Resolver};
use placemark_engine::kml::document::KmlDocument;
use placemark_engine::kml::writer;
use placemark_engine::utils::config::AppConfig;


//
// CLI SURFACE
//

#[derive(Parser)]
#[command(name = "placemark_engine")]
#[command(about = "Convert CSV location data to a KML document")]
struct Cli {
    /// Path to the input CSV file
    csv_file: PathBuf,

    /// Output KML path (default: input path with a .kml extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name of the address column
    #[arg(short = 'a', long, default_value = "Address")]
    address_column: String,

    /// Column to use for placemark names
    #[arg(short = 'n', long)]
    name_column: Option<String>,

    /// Skip geocoding and read coordinates from the CSV
    #[arg(long)]
    skip_geocoding: bool,

    /// Latitude column name (coordinate mode)
    #[arg(long, default_value = "Latitude")]
    lat_column: String,

    /// Longitude column name (coordinate mode)
    #[arg(long, default_value = "Longitude")]
    lon_column: String,
}


#[tokio::main]
async fn main() {
    // 1. Initialize Logger with a default level of "info"
    // This ensures you see the logs even without setting RUST_LOG environment variable
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("{}", e);
        process::exit(1);
    }
}


async fn run(cli: Cli) -> Result<()> {
    // #1. Load service configuration
    let config = AppConfig::load()?;

    // #2. Open the input and capture its header row
    let reader = RecordReader::open(&cli.csv_file)?;
    let headers = reader.headers().to_vec();
    info!("reading {}", cli.csv_file.display());

    // #3. Build the resolver for the selected mode
    let mut resolver = if cli.skip_geocoding {
        resolver::require_column(&headers, &cli.lat_column)?;
        resolver::require_column(&headers, &cli.lon_column)?;
        info!(
            "using coordinate columns \"{}\" / \"{}\"",
            cli.lat_column, cli.lon_column
        );
        let columns = ColumnSpec {
            address: cli.address_column.clone(),
            name: cli.name_column.clone(),
            latitude: cli.lat_column.clone(),
            longitude: cli.lon_column.clone(),
        };
        Resolver::for_coordinates(columns, headers, &config)
    } else {
        let address = resolver::locate_address_column(&headers, &cli.address_column)?;
        info!(
            "geocoding addresses from column \"{}\" via {}",
            address, config.geocoder_provider
        );
        let columns = ColumnSpec {
            address,
            name: cli.name_column.clone(),
            latitude: cli.lat_column.clone(),
            longitude: cli.lon_column.clone(),
        };
        let geocoder = build_geocoder(config.geocoder_provider, &config);
        Resolver::for_geocoding(columns, headers, geocoder, &config)
    };

    // #4. Resolve rows in input order, one at a time
    let mut placemarks = Vec::new();
    for record in reader {
        let record = record?;
        if let Some(placemark) = resolver.resolve(&record).await {
            placemarks.push(placemark);
        }
    }

    // #5. Rows existed but none resolved: that is a failed run
    let summary = resolver.summary;
    if placemarks.is_empty() && summary.rows_seen() > 0 {
        return Err(ConvertError::NoResolvablePoints {
            skipped: summary.skipped,
        });
    }

    // #6. Assemble and serialize
    let title = cli
        .csv_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("CSV Data Points")
        .to_string();
    let document = KmlDocument::new(title, placemarks);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.csv_file.with_extension("kml"));
    writer::write_file(&document, &output)?;

    info!(
        "wrote {} placemarks to {} ({})",
        document.len(),
        output.display(),
        summary
    );
    Ok(())
}
