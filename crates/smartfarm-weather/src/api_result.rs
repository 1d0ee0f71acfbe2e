//! Tagged outcome of a remote call.
//!
//! `ApiResult` travels between pipeline stages and out to callers instead of
//! a bare `Result`, so a consumer can render `Loading` before the terminal
//! value arrives.

use crate::error::WeatherError;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Loading,
    Success(T),
    Error { error: WeatherError, message: String },
}

/// The error half of an `ApiResult`, used with `?` inside pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    pub error: WeatherError,
    pub message: String,
}

impl ApiFailure {
    /// Build a failure with an explicit message. A blank message falls back
    /// to the error's own description.
    pub fn new(error: WeatherError, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            error.to_string()
        } else {
            message
        };
        Self { error, message }
    }
}

impl From<WeatherError> for ApiFailure {
    fn from(error: WeatherError) -> Self {
        let message = error.to_string();
        Self { error, message }
    }
}

impl<T> ApiResult<T> {
    /// Wrap an error, deriving the message from it.
    pub fn from_error(error: WeatherError) -> Self {
        ApiFailure::from(error).into()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// `Success` and `Error` end a request; `Loading` does not.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&WeatherError> {
        match self {
            Self::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Loading => ApiResult::Loading,
            Self::Success(value) => ApiResult::Success(f(value)),
            Self::Error { error, message } => ApiResult::Error { error, message },
        }
    }

    /// Chain another fallible step onto a success; errors and `Loading`
    /// pass through untouched.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> ApiResult<U>) -> ApiResult<U> {
        match self {
            Self::Loading => ApiResult::Loading,
            Self::Success(value) => f(value),
            Self::Error { error, message } => ApiResult::Error { error, message },
        }
    }

    /// Convert into a `Result` so stages can short-circuit with `?`.
    ///
    /// # Errors
    /// Returns the carried failure for `Error`, and an `Unknown` failure for
    /// `Loading`, which never counts as an outcome.
    pub fn into_result(self) -> Result<T, ApiFailure> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error { error, message } => Err(ApiFailure { error, message }),
            Self::Loading => Err(WeatherError::Unknown("operation has not completed".into()).into()),
        }
    }
}

impl<T> From<ApiFailure> for ApiResult<T> {
    fn from(failure: ApiFailure) -> Self {
        Self::Error {
            error: failure.error,
            message: failure.message,
        }
    }
}

impl<T> From<Result<T, ApiFailure>> for ApiResult<T> {
    fn from(result: Result<T, ApiFailure>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(failure) => failure.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_error_message_is_non_empty() {
        let result: ApiResult<()> = ApiResult::from_error(WeatherError::Timeout);
        match result {
            ApiResult::Error { message, .. } => assert_eq!(message, "Request timed out"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_message_falls_back_to_error_text() {
        let failure = ApiFailure::new(WeatherError::Unknown("boom".into()), "  ");
        assert_eq!(failure.message, "Unexpected error: boom");
    }

    #[test]
    fn test_terminal_states() {
        assert!(!ApiResult::<u8>::Loading.is_terminal());
        assert!(ApiResult::Success(1).is_terminal());
        assert!(ApiResult::<u8>::from_error(WeatherError::Timeout).is_terminal());
    }

    #[test]
    fn test_and_then_short_circuits() {
        let mut called = false;
        let result = ApiResult::<u8>::from_error(WeatherError::Timeout).and_then(|v| {
            called = true;
            ApiResult::Success(v + 1)
        });
        assert!(!called);
        assert_eq!(result.error(), Some(&WeatherError::Timeout));

        let result = ApiResult::Success(1u8).and_then(|v| ApiResult::Success(v * 10));
        assert_eq!(result, ApiResult::Success(10));
    }

    #[test]
    fn test_map_keeps_loading() {
        assert!(ApiResult::<u8>::Loading.map(|v| v + 1).is_loading());
        assert_eq!(ApiResult::Success(2u8).map(|v| v * 2).success(), Some(4));
    }

    #[test]
    fn test_loading_is_not_a_result() {
        let err = ApiResult::<u8>::Loading.into_result().unwrap_err();
        assert!(matches!(err.error, WeatherError::Unknown(_)));
    }

    #[test]
    fn test_result_round_trip_preserves_message() {
        let failure = ApiFailure::new(
            WeatherError::LocationNotFound("Nowhere".into()),
            "Could not find location: Nowhere",
        );
        let result: ApiResult<u8> = Result::<u8, ApiFailure>::Err(failure.clone()).into();
        assert_eq!(result.into_result(), Err(failure));
    }
}
