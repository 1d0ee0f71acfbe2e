use async_trait::async_trait;

use crate::error::WeatherError;
use crate::raw::{CurrentConditionsRaw, ForecastRaw, LocationCandidate};

/// Remote weather provider.
///
/// Implementations perform exactly one network exchange per call and report
/// failures as `WeatherError`; the pipeline decides what a failure means.
#[async_trait]
pub trait WeatherApiService: Send + Sync {
    /// Free-text city search. Candidates come back in the provider's ranking
    /// order.
    async fn search_location_by_text(
        &self,
        api_key: &str,
        query: &str,
    ) -> Result<Vec<LocationCandidate>, WeatherError>;

    /// Reverse lookup for `"<lat>,<lon>"`.
    async fn search_location_by_coordinates(
        &self,
        api_key: &str,
        coordinates: &str,
    ) -> Result<LocationCandidate, WeatherError>;

    async fn get_current_conditions(
        &self,
        location_key: &str,
        api_key: &str,
    ) -> Result<Vec<CurrentConditionsRaw>, WeatherError>;

    async fn get_five_day_forecast(
        &self,
        location_key: &str,
        api_key: &str,
    ) -> Result<ForecastRaw, WeatherError>;
}
