//! Raw provider responses to `WeatherData`.

use crate::raw::{CurrentConditionsRaw, ForecastRaw};
use crate::types::{CurrentConditions, ForecastEntry, WeatherData};

/// Merge a forecast response, the resolved location name and the optional
/// current conditions into one `WeatherData`.
///
/// Forecast entries keep the order the provider sent them in.
pub fn to_weather_data(
    forecast: ForecastRaw,
    location_name: &str,
    current: Option<CurrentConditionsRaw>,
) -> WeatherData {
    WeatherData {
        location_display_name: location_name.to_string(),
        current_conditions: current.map(CurrentConditions::from),
        forecast: forecast
            .daily_forecasts
            .into_iter()
            .map(ForecastEntry::from)
            .collect(),
        headline: forecast.headline.map(|h| h.text),
    }
}
