//! Sistema RAC geocoding CLI
//!
//! Command-line access to the address resolver: forward and reverse
//! geocoding, address validation, and distance calculation. Results are
//! printed to stdout as JSON; logs go to stderr.

#![allow(clippy::print_stdout)]

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use domain::DomainError;
use domain::value_objects::{AddressQuery, GeoLocation};
use integration_geocoding::{AddressResolver, GeocodingError, calculate_distance};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, LogFormat};

/// Sistema RAC geocoding CLI
#[derive(Parser)]
#[command(name = "rac-geo")]
#[command(author, version, about = "Sistema RAC address resolver", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log format (overrides the configuration file)
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Address arguments shared by `geocode` and `validate`
#[derive(clap::Args, Debug)]
struct AddressArgs {
    /// Street address
    address: String,

    /// City / municipality
    #[arg(long)]
    city: Option<String>,

    /// State / region (e.g. SP)
    #[arg(long)]
    state: Option<String>,

    /// Establishment name, used as a fallback hint
    #[arg(long)]
    establishment: Option<String>,
}

impl AddressArgs {
    fn to_query(&self) -> Result<AddressQuery, DomainError> {
        let mut query = AddressQuery::try_new(self.address.clone())?;
        if let Some(city) = &self.city {
            query = query.with_city(city.clone());
        }
        if let Some(state) = &self.state {
            query = query.with_state(state.clone());
        }
        if let Some(name) = &self.establishment {
            query = query.with_establishment_name(name.clone());
        }
        Ok(query)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve an address to coordinates
    ///
    /// Example: rac-geo geocode "Av. Paulista, 1578" --city "São Paulo" --state SP
    Geocode(AddressArgs),

    /// Resolve coordinates to an address
    ///
    /// Example: rac-geo reverse -23.5614 -46.6559
    #[command(allow_negative_numbers = true)]
    Reverse {
        /// Latitude in degrees
        latitude: f64,
        /// Longitude in degrees
        longitude: f64,
    },

    /// Check whether an address resolves (exit code 1 if not)
    Validate(AddressArgs),

    /// Great-circle distance in kilometers between two points
    ///
    /// Example: rac-geo distance -23.5505 -46.6333 -22.9068 -43.1729
    #[command(allow_negative_numbers = true)]
    Distance {
        /// Origin latitude
        lat1: f64,
        /// Origin longitude
        lon1: f64,
        /// Destination latitude
        lat2: f64,
        /// Destination longitude
        lon2: f64,
    },

    /// Show whether a geocoding API key is configured
    Status,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter_from_verbosity(verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

fn success_json(data: impl Serialize) -> serde_json::Value {
    json!({ "success": true, "data": data })
}

fn failure_json(error: &GeocodingError) -> serde_json::Value {
    json!({
        "success": false,
        "kind": error.kind(),
        "error": error.to_string(),
    })
}

/// Rejected input never reaches the resolver
fn invalid_input_json(error: &DomainError) -> serde_json::Value {
    json!({
        "success": false,
        "kind": "invalid_input",
        "error": error.to_string(),
    })
}

fn print_json(value: &serde_json::Value, pretty: bool) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{text}");
    Ok(())
}

/// Print the outcome of a resolver call and map it to an exit code
fn report<T: Serialize>(
    result: Result<T, GeocodingError>,
    pretty: bool,
) -> anyhow::Result<ExitCode> {
    match result {
        Ok(data) => {
            print_json(&success_json(data), pretty)?;
            Ok(ExitCode::SUCCESS)
        },
        Err(e) => {
            print_json(&failure_json(&e), pretty)?;
            Ok(ExitCode::FAILURE)
        },
    }
}

fn reject(error: &DomainError, pretty: bool) -> anyhow::Result<ExitCode> {
    debug!(error = %error, "Rejected invalid input");
    print_json(&invalid_input_json(error), pretty)?;
    Ok(ExitCode::FAILURE)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let app_config = AppConfig::load(cli.config.as_deref())?;

    init_tracing(cli.verbose, cli.log_format.unwrap_or(app_config.log_format));

    app_config.validate().map_err(anyhow::Error::msg)?;
    debug!(
        credential = %app_config.geocoding.credential_status(),
        base_url = %app_config.geocoding.base_url,
        "Configuration loaded"
    );
    debug!(command = ?cli.command, "Dispatching command");

    match cli.command {
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            let distance_km = calculate_distance(lat1, lon1, lat2, lon2);
            print_json(&success_json(json!({ "distance_km": distance_km })), cli.pretty)?;
            Ok(ExitCode::SUCCESS)
        },

        Commands::Status => {
            let geocoding = &app_config.geocoding;
            print_json(
                &success_json(json!({
                    "credential": geocoding.credential_status(),
                    "base_url": geocoding.base_url,
                    "language": geocoding.language,
                    "region": geocoding.region,
                    "timeout_secs": geocoding.timeout_secs,
                })),
                cli.pretty,
            )?;
            Ok(ExitCode::SUCCESS)
        },

        Commands::Geocode(args) => {
            let query = match args.to_query() {
                Ok(query) => query,
                Err(e) => return reject(&e, cli.pretty),
            };
            let resolver = AddressResolver::from_config(&app_config.geocoding)?;
            report(resolver.geocode(&query).await, cli.pretty)
        },

        Commands::Reverse {
            latitude,
            longitude,
        } => {
            // Range validation belongs to the caller, not the resolver
            if let Err(e) = GeoLocation::new(latitude, longitude) {
                return reject(&e, cli.pretty);
            }
            let resolver = AddressResolver::from_config(&app_config.geocoding)?;
            report(
                resolver.reverse_geocode(latitude, longitude).await,
                cli.pretty,
            )
        },

        Commands::Validate(args) => {
            let query = match args.to_query() {
                Ok(query) => query,
                Err(e) => return reject(&e, cli.pretty),
            };
            let resolver = AddressResolver::from_config(&app_config.geocoding)?;
            let valid = resolver.validate_address(&query).await;
            print_json(&success_json(json!({ "valid": valid })), cli.pretty)?;
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        },
    }
}
