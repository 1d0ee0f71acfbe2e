//! Errors as the person running SmartFarm sees them.
//!
//! The weather pipeline keeps its own detailed error type. The binary folds
//! each failure into an [`AppError`] and prints `user_message()`; the
//! `Display` text goes to the log.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error shown at the edge of the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("network: {0}")]
    Network(#[from] NetworkError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("weather provider: {0}")]
    Provider(#[from] ProviderError),

    /// A failure the pipeline could not classify.
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    /// Short, non-technical text for the terminal.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Provider(e) => e.user_message(),
            AppError::Internal(_) => "Weather lookup failed unexpectedly. Try again.",
        }
    }
}

/// Getting bytes to and from the weather provider.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("weather request ran past its deadline")]
    TimedOut,

    #[error("provider returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("provider payload could not be read: {0}")]
    MalformedPayload(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::Unreachable(_) => {
                "Could not reach the weather provider. Check the farm's internet connection."
            }
            NetworkError::TimedOut => {
                "The weather provider is slow to answer. Try again in a moment."
            }
            NetworkError::Upstream { .. } => {
                "The weather provider is having problems. Try again later."
            }
            NetworkError::MalformedPayload(_) => {
                "The weather provider sent data SmartFarm could not read."
            }
        }
    }
}

/// Loading and checking `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("this platform has no per-user config directory")]
    NoConfigDir,

    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid TOML: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot encode config as TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    /// A setting without which no request can be made.
    #[error("required setting {0} is not set")]
    MissingSetting(&'static str),

    /// Validation errors, joined into one line.
    #[error("{0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir | ConfigError::Io { .. } | ConfigError::Encode(_) => {
                "SmartFarm could not read or write its config file."
            }
            ConfigError::Parse { .. } => "The SmartFarm config file is not valid TOML.",
            ConfigError::MissingSetting(_) => {
                "No weather API key configured. Add weather.api_key to the config file or set SMARTFARM_WEATHER_API_KEY."
            }
            ConfigError::Invalid(_) => "The SmartFarm config file has invalid weather settings.",
        }
    }
}

/// Answers from the weather provider that are not transport problems.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no location matches {0:?}")]
    UnknownPlace(String),

    #[error("provider rejected the API key")]
    BadApiKey,

    /// Quota exhausted or provider down for maintenance.
    #[error("provider is not serving requests")]
    Unavailable,

    #[error("provider rejected the request: {0}")]
    Rejected(String),
}

impl ProviderError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ProviderError::UnknownPlace(_) => {
                "No place by that name. Try a nearby town or use coordinates."
            }
            ProviderError::BadApiKey => "The weather API key was refused. Check the config file.",
            ProviderError::Unavailable => {
                "The weather provider is not answering right now, possibly because the daily quota is used up."
            }
            ProviderError::Rejected(_) => "The weather provider refused the request.",
        }
    }
}
