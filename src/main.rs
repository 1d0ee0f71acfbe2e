use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use smartfarm_core::{AppError, Config};
use smartfarm_weather::{AccuWeatherClient, ApiResult, WeatherData, WeatherRepository};

mod error_mapping;

#[derive(Parser, Debug)]
#[command(name = "smartfarm")]
#[command(version, about = "Current conditions and five-day forecast for a farm location")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up weather by place name
    #[command(name = "place")]
    Place {
        /// Free-text location, e.g. "Nairobi"
        query: String,
    },

    /// Look up weather by coordinates
    #[command(name = "coords")]
    Coords {
        /// Latitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    smartfarm_core::init()?;

    let config = match Config::load_validated() {
        Ok((config, _)) => config,
        Err(e) => {
            let err = AppError::Config(e);
            tracing::error!("{}", err);
            eprintln!("{}", err.user_message());
            std::process::exit(2);
        }
    };

    let weather = &config.weather;
    let client = AccuWeatherClient::with_base_url(&weather.base_url, weather.request_timeout())?
        .metric(weather.metric)
        .language(weather.language.clone());

    let mut repository = WeatherRepository::new(Arc::new(client), weather.api_key.clone());
    if let Some(deadline) = weather.deadline() {
        repository = repository.with_deadline(deadline);
    }

    let mut stream = match cli.command {
        Command::Place { query } => repository.get_weather_by_location(&query),
        Command::Coords { lat, lon } => repository.get_weather_by_coordinates(lat, lon),
    };

    let mut failed = false;
    while let Some(emission) = stream.next().await {
        match emission {
            ApiResult::Loading => println!("Loading weather..."),
            ApiResult::Success(data) => print!("{}", render(&data)),
            ApiResult::Error { error, message } => {
                let err = error_mapping::app_error(error);
                tracing::debug!("Weather request failed: {}", err);
                eprintln!("{}\n{}", message, err.user_message());
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn render(data: &WeatherData) -> String {
    let mut out = format!("{}\n", data.location_display_name);

    match &data.current_conditions {
        Some(now) => out.push_str(&format!("Now: {}, {}\n", now.temperature, now.weather_text)),
        None => out.push_str("Now: unavailable\n"),
    }

    if let Some(headline) = &data.headline {
        out.push_str(&format!("{}\n", headline));
    }

    for entry in &data.forecast {
        out.push_str(&format!(
            "{}  {} / {}  {} / {}\n",
            entry.date, entry.low, entry.high, entry.day.phrase, entry.night.phrase
        ));
    }

    out
}
