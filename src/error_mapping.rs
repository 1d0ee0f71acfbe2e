//! Folds weather pipeline errors into smartfarm_core::AppError for display.

use smartfarm_core::{AppError, NetworkError, ProviderError};
use smartfarm_weather::WeatherError;

pub fn app_error(e: WeatherError) -> AppError {
    match e {
        WeatherError::Transport(s) => AppError::Network(NetworkError::Unreachable(s)),
        WeatherError::Timeout => AppError::Network(NetworkError::TimedOut),
        WeatherError::Deserialization(s) => AppError::Network(NetworkError::MalformedPayload(s)),
        WeatherError::LocationNotFound(q) => AppError::Provider(ProviderError::UnknownPlace(q)),
        WeatherError::Provider { status: 401 | 403, .. } => {
            AppError::Provider(ProviderError::BadApiKey)
        }
        // AccuWeather answers 503 when the daily quota is used up.
        WeatherError::Provider { status: 429 | 503, .. } => {
            AppError::Provider(ProviderError::Unavailable)
        }
        WeatherError::Provider { status, message } if status >= 500 => {
            AppError::Network(NetworkError::Upstream { status, message })
        }
        WeatherError::Provider { message, .. } => {
            AppError::Provider(ProviderError::Rejected(message))
        }
        WeatherError::Unknown(s) => AppError::Internal(s),
    }
}
