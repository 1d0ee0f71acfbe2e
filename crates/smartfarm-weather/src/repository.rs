//! Weather orchestration: location lookup, current conditions, forecast.
//!
//! A request resolves a location (essential), fetches current conditions
//! (best effort), fetches the five-day forecast (essential) and merges the
//! three into `WeatherData`. The calls run one after another on the task
//! that owns the request.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::api_result::{ApiFailure, ApiResult};
use crate::error::WeatherError;
use crate::mapper::to_weather_data;
use crate::safe_call::safe_api_call;
use crate::service::WeatherApiService;
use crate::types::{LocationKey, WeatherData};

#[derive(Clone)]
pub struct WeatherRepository {
    service: Arc<dyn WeatherApiService>,
    api_key: Arc<str>,
    deadline: Option<Duration>,
}

impl std::fmt::Debug for WeatherRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherRepository")
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl WeatherRepository {
    pub fn new(service: Arc<dyn WeatherApiService>, api_key: impl Into<String>) -> Self {
        let api_key: String = api_key.into();
        Self {
            service,
            api_key: Arc::from(api_key),
            deadline: None,
        }
    }

    /// Bound every request made through this repository. When the deadline
    /// passes, the stage in flight is abandoned and the request ends with
    /// `WeatherError::Timeout`.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Weather for a free-text place name.
    ///
    /// The returned stream yields `Loading` and then exactly one terminal
    /// value. Must be called from within a tokio runtime.
    pub fn get_weather_by_location(&self, query: &str) -> WeatherStream {
        let repo = self.clone();
        let query = query.to_string();
        WeatherStream::spawn(async move { repo.fetch_weather_by_location(&query).await })
    }

    /// Weather for a coordinate pair; same emission contract as
    /// [`get_weather_by_location`](Self::get_weather_by_location).
    pub fn get_weather_by_coordinates(&self, lat: f64, lon: f64) -> WeatherStream {
        let repo = self.clone();
        WeatherStream::spawn(async move { repo.fetch_weather_by_coordinates(lat, lon).await })
    }

    /// Terminal outcome of a text query, awaited on the caller's task.
    pub async fn fetch_weather_by_location(&self, query: &str) -> ApiResult<WeatherData> {
        tracing::debug!("Fetching weather for query {:?}", query);
        self.run(self.resolve_by_text(query)).await
    }

    /// Terminal outcome of a coordinate query, awaited on the caller's task.
    pub async fn fetch_weather_by_coordinates(&self, lat: f64, lon: f64) -> ApiResult<WeatherData> {
        tracing::debug!("Fetching weather for coordinates {},{}", lat, lon);
        self.run(self.resolve_by_coordinates(lat, lon)).await
    }

    async fn run<R>(&self, resolve: R) -> ApiResult<WeatherData>
    where
        R: Future<Output = Result<LocationKey, ApiFailure>>,
    {
        let pipeline = async {
            let location = resolve.await?;
            self.fetch_for_location(&location).await
        };

        let outcome = match self.deadline {
            Some(deadline) => match tokio::time::timeout(deadline, pipeline).await {
                Ok(outcome) => outcome,
                Err(elapsed) => {
                    tracing::warn!("Weather request exceeded deadline of {:?}", deadline);
                    Err(WeatherError::from(elapsed).into())
                }
            },
            None => pipeline.await,
        };

        match &outcome {
            Ok(data) => tracing::info!(
                "Weather ready for {} ({} forecast days)",
                data.location_display_name,
                data.forecast.len()
            ),
            Err(failure) => tracing::warn!(
                kind = ?failure.error.kind(),
                "Weather request failed: {}",
                failure.message
            ),
        }

        outcome.into()
    }

    async fn resolve_by_text(&self, query: &str) -> Result<LocationKey, ApiFailure> {
        let candidates = safe_api_call(move || {
            self.service.search_location_by_text(&self.api_key, query)
        })
        .await
        .into_result()?;

        // Provider ranking is authoritative: the first candidate wins.
        let first = candidates.into_iter().next().ok_or_else(|| {
            ApiFailure::new(
                WeatherError::LocationNotFound(query.to_string()),
                format!("Could not find location: {}", query),
            )
        })?;

        Ok(LocationKey::from(first))
    }

    async fn resolve_by_coordinates(&self, lat: f64, lon: f64) -> Result<LocationKey, ApiFailure> {
        let coordinates = format!("{},{}", lat, lon);
        let query = coordinates.as_str();

        let candidate = safe_api_call(move || {
            self.service.search_location_by_coordinates(&self.api_key, query)
        })
        .await
        .into_result()?;

        if candidate.key.trim().is_empty() {
            return Err(ApiFailure::new(
                WeatherError::LocationNotFound(coordinates.clone()),
                format!("Could not find location for coordinates: {}", coordinates),
            ));
        }

        Ok(LocationKey::from(candidate))
    }

    /// Shared tail of both pipelines: conditions (best effort), forecast,
    /// merge.
    async fn fetch_for_location(&self, location: &LocationKey) -> Result<WeatherData, ApiFailure> {
        let key = location.key.as_str();
        tracing::debug!("Resolved location {} -> {}", location.display_name(), key);

        let current = match safe_api_call(move || {
            self.service.get_current_conditions(key, &self.api_key)
        })
        .await
        {
            ApiResult::Success(conditions) => {
                if conditions.is_empty() {
                    tracing::debug!("No current conditions for {}", key);
                }
                conditions.into_iter().next()
            }
            ApiResult::Error { message, .. } => {
                tracing::warn!("Continuing without current conditions: {}", message);
                None
            }
            ApiResult::Loading => None,
        };

        let forecast = safe_api_call(move || {
            self.service.get_five_day_forecast(key, &self.api_key)
        })
        .await
        .into_result()?;

        if forecast.daily_forecasts.is_empty() {
            return Err(ApiFailure::new(
                WeatherError::Deserialization("forecast contained no daily entries".into()),
                format!("No forecast available for {}", location.display_name()),
            ));
        }

        Ok(to_weather_data(forecast, &location.display_name(), current))
    }
}

/// Emissions of one weather request: `Loading`, then one terminal value.
///
/// Dropping the stream, or calling [`cancel`](Self::cancel), abandons the
/// request; nothing is delivered after that.
#[derive(Debug)]
pub struct WeatherStream {
    rx: mpsc::Receiver<ApiResult<WeatherData>>,
    cancel: CancellationToken,
}

impl WeatherStream {
    fn spawn<F>(pipeline: F) -> Self
    where
        F: Future<Output = ApiResult<WeatherData>> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(2);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            if tx.send(ApiResult::Loading).await.is_err() {
                return;
            }

            // The pipeline runs in its own task so a panicking stage still
            // ends the request with an Error instead of a closed channel.
            let mut task = tokio::spawn(pipeline);

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    task.abort();
                    tracing::debug!("Weather request cancelled");
                }
                joined = &mut task => {
                    let outcome = match joined {
                        Ok(outcome) => outcome,
                        Err(e) if e.is_panic() => {
                            tracing::error!("Weather request task panicked");
                            ApiResult::from_error(WeatherError::Unknown(
                                "weather request task panicked".into(),
                            ))
                        }
                        Err(_) => return,
                    };
                    if !token.is_cancelled() {
                        let _ = tx.send(outcome).await;
                    }
                }
            }
        });

        Self { rx, cancel }
    }

    /// Next emission, or `None` once the request is finished or cancelled.
    pub async fn next(&mut self) -> Option<ApiResult<WeatherData>> {
        if self.cancel.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            item = self.rx.recv() => item,
        }
    }

    /// Skip `Loading` and wait for the terminal value.
    pub async fn terminal(mut self) -> Option<ApiResult<WeatherData>> {
        while let Some(item) = self.next().await {
            if item.is_terminal() {
                return Some(item);
            }
        }
        None
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token for tying the request to a wider scope, e.g. a screen's lifetime.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Drop for WeatherStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
