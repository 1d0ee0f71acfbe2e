//! Weather acquisition for SmartFarm
//!
//! Resolves a place name or coordinate pair to an AccuWeather location,
//! then fetches current conditions and a five-day forecast and merges them
//! into one `WeatherData`.

pub mod api_result;
pub mod client;
pub mod error;
pub mod mapper;
pub mod raw;
pub mod repository;
pub mod safe_call;
pub mod service;
pub mod types;

pub use api_result::{ApiFailure, ApiResult};
pub use client::AccuWeatherClient;
pub use error::{ErrorKind, WeatherError};
pub use mapper::to_weather_data;
pub use repository::{WeatherRepository, WeatherStream};
pub use safe_call::safe_api_call;
pub use service::WeatherApiService;
pub use types::*;
