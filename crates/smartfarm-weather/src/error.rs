//! Weather pipeline error types.

use thiserror::Error;

/// Coarse classification of a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or I/O failure, including timeouts.
    TransportFailure,
    /// The provider answered with a payload we could not decode.
    DeserializationFailure,
    /// A location search produced no usable match.
    NotFound,
    /// The provider answered with an error status.
    ProviderError,
    /// Anything that does not fit the kinds above.
    Unknown,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed provider response: {0}")]
    Deserialization(String),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::Timeout => ErrorKind::TransportFailure,
            Self::Deserialization(_) => ErrorKind::DeserializationFailure,
            Self::LocationNotFound(_) => ErrorKind::NotFound,
            Self::Provider { .. } => ErrorKind::ProviderError,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Network error. Check your connection.".to_string(),
            Self::Timeout => "The weather service took too long to respond.".to_string(),
            Self::Deserialization(_) => {
                "Received an unexpected response from the weather service.".to_string()
            }
            Self::LocationNotFound(query) => format!("Could not find location: {}", query),
            Self::Provider { status: 401 | 403, .. } => {
                "Weather API key is invalid. Check settings.".to_string()
            }
            Self::Provider { status: 429, .. } => {
                "Weather service request limit reached. Please try again later.".to_string()
            }
            Self::Provider { message, .. } => format!("Weather service error: {}", message),
            Self::Unknown(_) => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// Whether re-running the whole request has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout => true,
            Self::Provider { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Deserialization(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Provider {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else if e.is_builder() {
            Self::Unknown(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(e: serde_json::Error) -> Self {
        Self::Deserialization(e.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for WeatherError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::Timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(WeatherError::Timeout.kind(), ErrorKind::TransportFailure);
        assert_eq!(
            WeatherError::Transport("reset".into()).kind(),
            ErrorKind::TransportFailure
        );
        assert_eq!(
            WeatherError::Deserialization("eof".into()).kind(),
            ErrorKind::DeserializationFailure
        );
        assert_eq!(
            WeatherError::LocationNotFound("x".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            WeatherError::Provider { status: 500, message: "x".into() }.kind(),
            ErrorKind::ProviderError
        );
        assert_eq!(WeatherError::Unknown("x".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_user_messages() {
        let err = WeatherError::LocationNotFound("Atlantis".into());
        assert!(err.user_message().contains("Atlantis"));

        let err = WeatherError::Provider { status: 401, message: "Api Authorization failed".into() };
        assert!(err.user_message().contains("API key"));

        let err = WeatherError::Provider { status: 400, message: "bad q".into() };
        assert!(err.user_message().contains("bad q"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(WeatherError::Timeout.is_retryable());
        assert!(WeatherError::Provider { status: 503, message: String::new() }.is_retryable());
        assert!(WeatherError::Provider { status: 429, message: String::new() }.is_retryable());
        assert!(!WeatherError::Provider { status: 401, message: String::new() }.is_retryable());
        assert!(!WeatherError::LocationNotFound("x".into()).is_retryable());
        assert!(!WeatherError::Deserialization("x".into()).is_retryable());
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: WeatherError = parse.unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailure);
    }
}
