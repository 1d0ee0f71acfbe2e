use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::raw::{CurrentConditionsRaw, DailyForecastRaw, LocationCandidate, Measure};

/// Weather condition categories mapped from AccuWeather icon numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Sleet,
    Thunderstorm,
    Windy,
}

impl WeatherCondition {
    /// Convert an AccuWeather icon number to WeatherCondition
    /// See: https://developer.accuweather.com/weather-icons
    pub fn from_icon(icon: u8) -> Self {
        match icon {
            1 | 2 | 30 | 31 | 33 | 34 => Self::Clear,
            3..=5 | 35..=37 => Self::PartlyCloudy,
            6..=8 | 38 => Self::Cloudy,
            11 => Self::Fog,
            12..=14 | 18 | 39 | 40 => Self::Rain,
            15..=17 | 41 | 42 => Self::Thunderstorm,
            19..=23 | 43 | 44 => Self::Snow,
            24..=26 | 29 => Self::Sleet,
            32 => Self::Windy,
            _ => Self::Clear, // Unknown icons default to clear
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Thunderstorm => "Thunderstorm",
            Self::Windy => "Windy",
        }
    }

    /// Get icon name for the UI layer
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::PartlyCloudy => "cloud_sun",
            Self::Cloudy => "cloud",
            Self::Fog => "cloud_fog",
            Self::Rain => "cloud_rain",
            Self::Snow => "cloud_snow",
            Self::Sleet => "cloud_snow",
            Self::Thunderstorm => "cloud_lightning",
            Self::Windy => "wind",
        }
    }
}

/// A resolved provider location. Subsequent calls for the same request are
/// keyed by `key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationKey {
    pub key: String,
    pub localized_name: String,
    pub country: String,
}

impl LocationKey {
    /// "Nairobi, Kenya"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.localized_name, self.country)
    }
}

impl From<LocationCandidate> for LocationKey {
    fn from(candidate: LocationCandidate) -> Self {
        Self {
            key: candidate.key,
            localized_name: candidate.localized_name,
            country: candidate.country.english_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub value: f64,
    pub unit: String,
}

impl From<Measure> for Temperature {
    fn from(measure: Measure) -> Self {
        Self {
            value: measure.value,
            unit: measure.unit,
        }
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}°{}", self.value, self.unit)
    }
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub observed_at: DateTime<FixedOffset>,
    pub weather_text: String,
    pub condition: WeatherCondition,
    pub has_precipitation: bool,
    pub precipitation_type: Option<String>,
    pub is_day_time: bool,
    pub temperature: Temperature,
    pub temperature_imperial: Option<Temperature>,
}

impl From<CurrentConditionsRaw> for CurrentConditions {
    fn from(raw: CurrentConditionsRaw) -> Self {
        Self {
            observed_at: raw.local_observation_date_time,
            weather_text: raw.weather_text,
            condition: raw
                .weather_icon
                .map(WeatherCondition::from_icon)
                .unwrap_or_default(),
            has_precipitation: raw.has_precipitation,
            precipitation_type: raw.precipitation_type,
            is_day_time: raw.is_day_time,
            temperature: raw.temperature.metric.into(),
            temperature_imperial: raw.temperature.imperial.map(Temperature::from),
        }
    }
}

/// Half of a forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub condition: WeatherCondition,
    pub phrase: String,
    pub has_precipitation: bool,
}

/// Daily forecast entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub date: NaiveDate,
    pub low: Temperature,
    pub high: Temperature,
    pub day: ForecastPeriod,
    pub night: ForecastPeriod,
}

impl From<DailyForecastRaw> for ForecastEntry {
    fn from(raw: DailyForecastRaw) -> Self {
        let period = |part: crate::raw::DayPart| ForecastPeriod {
            condition: WeatherCondition::from_icon(part.icon),
            phrase: part.icon_phrase,
            has_precipitation: part.has_precipitation,
        };

        Self {
            date: raw.date.date_naive(),
            low: raw.temperature.minimum.into(),
            high: raw.temperature.maximum.into(),
            day: period(raw.day),
            night: period(raw.night),
        }
    }
}

/// Complete weather data bundle for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub location_display_name: String,
    pub current_conditions: Option<CurrentConditions>,
    /// Chronological, as delivered by the provider
    pub forecast: Vec<ForecastEntry>,
    pub headline: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::Country;

    #[test]
    fn test_icon_clear() {
        assert_eq!(WeatherCondition::from_icon(1), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_icon(33), WeatherCondition::Clear);
    }

    #[test]
    fn test_icon_partly_cloudy() {
        assert_eq!(WeatherCondition::from_icon(3), WeatherCondition::PartlyCloudy);
        assert_eq!(WeatherCondition::from_icon(4), WeatherCondition::PartlyCloudy);
        assert_eq!(WeatherCondition::from_icon(36), WeatherCondition::PartlyCloudy);
    }

    #[test]
    fn test_icon_cloudy_and_fog() {
        assert_eq!(WeatherCondition::from_icon(7), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::from_icon(38), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::from_icon(11), WeatherCondition::Fog);
    }

    #[test]
    fn test_icon_precipitation() {
        assert_eq!(WeatherCondition::from_icon(12), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_icon(18), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_icon(15), WeatherCondition::Thunderstorm);
        assert_eq!(WeatherCondition::from_icon(22), WeatherCondition::Snow);
        assert_eq!(WeatherCondition::from_icon(26), WeatherCondition::Sleet);
        assert_eq!(WeatherCondition::from_icon(29), WeatherCondition::Sleet);
    }

    #[test]
    fn test_icon_unknown_defaults_to_clear() {
        assert_eq!(WeatherCondition::from_icon(0), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_icon(99), WeatherCondition::Clear);
    }

    #[test]
    fn test_condition_description() {
        assert_eq!(WeatherCondition::Clear.description(), "Clear");
        assert_eq!(WeatherCondition::Thunderstorm.description(), "Thunderstorm");
        assert_eq!(WeatherCondition::Rain.icon_name(), "cloud_rain");
    }

    #[test]
    fn test_location_display_name() {
        let candidate = LocationCandidate {
            key: "224758".into(),
            localized_name: "Nairobi".into(),
            english_name: None,
            country: Country {
                id: "KE".into(),
                localized_name: "Kenya".into(),
                english_name: "Kenya".into(),
            },
            administrative_area: None,
            geo_position: None,
        };
        let location = LocationKey::from(candidate);
        assert_eq!(location.key, "224758");
        assert_eq!(location.display_name(), "Nairobi, Kenya");
    }

    #[test]
    fn test_temperature_display() {
        let t = Temperature { value: 25.04, unit: "C".into() };
        assert_eq!(t.to_string(), "25.0°C");
    }
}
