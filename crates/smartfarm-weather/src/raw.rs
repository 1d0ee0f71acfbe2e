//! AccuWeather response shapes, exactly as they come over the wire.
//!
//! Field names follow the provider's PascalCase JSON. Anything we do not
//! read is ignored by serde.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationCandidate {
    pub key: String,
    pub localized_name: String,
    #[serde(default)]
    pub english_name: Option<String>,
    pub country: Country,
    #[serde(default)]
    pub administrative_area: Option<AdministrativeArea>,
    #[serde(default)]
    pub geo_position: Option<GeoPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub localized_name: String,
    pub english_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AdministrativeArea {
    #[serde(rename = "ID", default)]
    pub id: String,
    #[serde(default)]
    pub localized_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// A value with its unit, e.g. `{"Value": 25.0, "Unit": "C", "UnitType": 17}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Measure {
    pub value: f64,
    pub unit: String,
    #[serde(default)]
    pub unit_type: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricImperial {
    pub metric: Measure,
    #[serde(default)]
    pub imperial: Option<Measure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentConditionsRaw {
    pub local_observation_date_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub epoch_time: i64,
    pub weather_text: String,
    #[serde(default)]
    pub weather_icon: Option<u8>,
    #[serde(default)]
    pub has_precipitation: bool,
    #[serde(default)]
    pub precipitation_type: Option<String>,
    #[serde(default)]
    pub is_day_time: bool,
    pub temperature: MetricImperial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForecastRaw {
    #[serde(default)]
    pub headline: Option<Headline>,
    #[serde(default)]
    pub daily_forecasts: Vec<DailyForecastRaw>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Headline {
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyForecastRaw {
    pub date: DateTime<FixedOffset>,
    #[serde(default)]
    pub epoch_date: i64,
    pub temperature: TemperatureRange,
    pub day: DayPart,
    pub night: DayPart,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemperatureRange {
    pub minimum: Measure,
    pub maximum: Measure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DayPart {
    pub icon: u8,
    pub icon_phrase: String,
    #[serde(default)]
    pub has_precipitation: bool,
}

/// Body of a non-2xx AccuWeather response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ProviderErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
