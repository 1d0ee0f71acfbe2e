use std::future::Future;

use crate::api_result::ApiResult;
use crate::error::WeatherError;

/// Run one remote operation and fold its outcome into an `ApiResult`.
///
/// The operation is invoked exactly once. Any error it returns is converted
/// into a `WeatherError`, classified, logged and handed back as
/// `ApiResult::Error`; nothing escapes as a `Result`.
pub async fn safe_api_call<T, E, F, Fut>(operation: F) -> ApiResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<WeatherError>,
{
    match operation().await {
        Ok(value) => ApiResult::Success(value),
        Err(e) => {
            let error: WeatherError = e.into();
            tracing::warn!(kind = ?error.kind(), "Remote call failed: {}", error);
            ApiResult::from_error(error)
        }
    }
}
