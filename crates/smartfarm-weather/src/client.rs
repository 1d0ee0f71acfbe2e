//! AccuWeather data service client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::error::WeatherError;
use crate::raw::{CurrentConditionsRaw, ForecastRaw, LocationCandidate, ProviderErrorBody};
use crate::service::WeatherApiService;

const ACCUWEATHER_API_BASE: &str = "https://dataservice.accuweather.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AccuWeatherClient {
    client: Client,
    base_url: String,
    metric: bool,
    language: Option<String>,
}

impl AccuWeatherClient {
    /// Client for the public AccuWeather endpoint.
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(ACCUWEATHER_API_BASE, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            metric: true,
            language: None,
        })
    }

    /// Ask for metric (default) or imperial forecast values.
    pub fn metric(mut self, metric: bool) -> Self {
        self.metric = metric;
        self
    }

    /// Provider language code, e.g. "en-us". Blank codes are ignored.
    pub fn language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        api_key: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .get(&url)
            .query(&[("apikey", api_key)])
            .query(params);
        if let Some(language) = &self.language {
            request = request.query(&[("language", language.as_str())]);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(WeatherError::from);
        }

        let message = match serde_json::from_str::<ProviderErrorBody>(&body) {
            Ok(ProviderErrorBody {
                message: Some(message),
                ..
            }) => message,
            Ok(ProviderErrorBody {
                code: Some(code), ..
            }) => code,
            _ if !body.trim().is_empty() => body,
            _ => status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string(),
        };

        tracing::debug!("Provider returned {}: {}", status, message);
        Err(WeatherError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl WeatherApiService for AccuWeatherClient {
    #[instrument(skip(self, api_key), level = "info")]
    async fn search_location_by_text(
        &self,
        api_key: &str,
        query: &str,
    ) -> Result<Vec<LocationCandidate>, WeatherError> {
        self.get_json("/locations/v1/cities/search", api_key, &[("q", query)])
            .await
    }

    #[instrument(skip(self, api_key), level = "info")]
    async fn search_location_by_coordinates(
        &self,
        api_key: &str,
        coordinates: &str,
    ) -> Result<LocationCandidate, WeatherError> {
        self.get_json(
            "/locations/v1/cities/geoposition/search",
            api_key,
            &[("q", coordinates)],
        )
        .await
    }

    #[instrument(skip(self, api_key), level = "info")]
    async fn get_current_conditions(
        &self,
        location_key: &str,
        api_key: &str,
    ) -> Result<Vec<CurrentConditionsRaw>, WeatherError> {
        let path = format!("/currentconditions/v1/{}", location_key);
        self.get_json(&path, api_key, &[]).await
    }

    #[instrument(skip(self, api_key), level = "info")]
    async fn get_five_day_forecast(
        &self,
        location_key: &str,
        api_key: &str,
    ) -> Result<ForecastRaw, WeatherError> {
        let path = format!("/forecasts/v1/daily/5day/{}", location_key);
        let metric = if self.metric { "true" } else { "false" };
        self.get_json(&path, api_key, &[("metric", metric)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> AccuWeatherClient {
        AccuWeatherClient::with_base_url(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn forecast_day(date: &str) -> serde_json::Value {
        serde_json::json!({
            "Date": date,
            "EpochDate": 1714536000,
            "Temperature": {
                "Minimum": {"Value": 14.0, "Unit": "C", "UnitType": 17},
                "Maximum": {"Value": 26.0, "Unit": "C", "UnitType": 17}
            },
            "Day": {"Icon": 3, "IconPhrase": "Partly sunny", "HasPrecipitation": false},
            "Night": {"Icon": 35, "IconPhrase": "Partly cloudy", "HasPrecipitation": false}
        })
    }

    #[tokio::test]
    async fn test_search_location_by_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locations/v1/cities/search"))
            .and(query_param("apikey", "test_key"))
            .and(query_param("q", "Nairobi"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "Key": "224758",
                    "LocalizedName": "Nairobi",
                    "Country": {"ID": "KE", "LocalizedName": "Kenya", "EnglishName": "Kenya"}
                },
                {
                    "Key": "999",
                    "LocalizedName": "Nairobi Hill",
                    "Country": {"ID": "KE", "LocalizedName": "Kenya", "EnglishName": "Kenya"}
                }
            ])))
            .mount(&mock_server)
            .await;

        let candidates = client(&mock_server)
            .search_location_by_text("test_key", "Nairobi")
            .await
            .unwrap();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].key, "224758");
        assert_eq!(candidates[1].localized_name, "Nairobi Hill");
    }

    #[tokio::test]
    async fn test_search_location_by_coordinates() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locations/v1/cities/geoposition/search"))
            .and(query_param("q", "-1.2864,36.8172"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Key": "224758",
                "LocalizedName": "Nairobi",
                "Country": {"ID": "KE", "LocalizedName": "Kenya", "EnglishName": "Kenya"}
            })))
            .mount(&mock_server)
            .await;

        let candidate = client(&mock_server)
            .search_location_by_coordinates("test_key", "-1.2864,36.8172")
            .await
            .unwrap();

        assert_eq!(candidate.key, "224758");
    }

    #[tokio::test]
    async fn test_get_current_conditions() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/currentconditions/v1/224758"))
            .and(query_param("apikey", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "LocalObservationDateTime": "2024-05-01T14:20:00+03:00",
                "EpochTime": 1714562400,
                "WeatherText": "Sunny",
                "WeatherIcon": 1,
                "HasPrecipitation": false,
                "IsDayTime": true,
                "Temperature": {"Metric": {"Value": 25.0, "Unit": "C", "UnitType": 17}}
            }])))
            .mount(&mock_server)
            .await;

        let conditions = client(&mock_server)
            .get_current_conditions("224758", "test_key")
            .await
            .unwrap();

        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].temperature.metric.value, 25.0);
        assert!(conditions[0].temperature.imperial.is_none());
    }

    #[tokio::test]
    async fn test_get_five_day_forecast_sends_units_and_language() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecasts/v1/daily/5day/224758"))
            .and(query_param("metric", "false"))
            .and(query_param("language", "sw-ke"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Headline": {"Text": "Warm week ahead", "Category": "heat"},
                "DailyForecasts": [
                    forecast_day("2024-05-01T07:00:00+03:00"),
                    forecast_day("2024-05-02T07:00:00+03:00")
                ]
            })))
            .mount(&mock_server)
            .await;

        let forecast = client(&mock_server)
            .metric(false)
            .language(Some("sw-ke".into()))
            .get_five_day_forecast("224758", "test_key")
            .await
            .unwrap();

        assert_eq!(forecast.daily_forecasts.len(), 2);
        assert_eq!(forecast.headline.unwrap().text, "Warm week ahead");
    }

    #[tokio::test]
    async fn test_provider_error_message_is_extracted() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locations/v1/cities/search"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "Code": "Unauthorized",
                "Message": "Api Authorization failed",
                "Reference": "/locations/v1/cities/search"
            })))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .search_location_by_text("bad_key", "Nairobi")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            WeatherError::Provider {
                status: 401,
                message: "Api Authorization failed".into()
            }
        );
    }

    #[tokio::test]
    async fn test_provider_error_without_body_uses_status_reason() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/currentconditions/v1/1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .get_current_conditions("1", "k")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            WeatherError::Provider {
                status: 503,
                message: "Service Unavailable".into()
            }
        );
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_malformed_json_is_deserialization_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecasts/v1/daily/5day/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"DailyForecasts\": [ {"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .get_five_day_forecast("1", "k")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DeserializationFailure);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_failure() {
        // Port 9 (discard) is closed on test machines; the connection is refused.
        let client =
            AccuWeatherClient::with_base_url("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

        let err = client
            .search_location_by_text("k", "Nairobi")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::TransportFailure);
    }
}
