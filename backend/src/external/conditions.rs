//! Hunting-conditions client for per-location weather lookups
//!
//! Integrates with OpenWeatherMap current conditions and maps the raw
//! reading to a waterfowl hunting-conditions rating.

use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

use shared::models::{HuntingConditions, WeatherRating};
use shared::types::Coordinates;

use crate::error::{AppError, AppResult};

/// Conditions API client
#[derive(Clone)]
pub struct ConditionsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

impl ConditionsClient {
    /// Create a new ConditionsClient
    pub fn new(api_key: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }

    /// Create a new ConditionsClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, timeout: Duration, base_url: String) -> Self {
        let mut client = Self::new(api_key, timeout);
        client.base_url = base_url;
        client
    }

    /// Fetch current hunting conditions by GPS coordinates
    pub async fn get_current(&self, coordinates: &Coordinates) -> AppResult<HuntingConditions> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=imperial",
            self.base_url, coordinates.latitude, coordinates.longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Conditions request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Conditions API error: {} - {}",
                status, body
            )));
        }

        let data: OWMCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse conditions response: {}", e)))?;

        Ok(convert_response(data))
    }
}

/// Convert an OpenWeatherMap response to our format
fn convert_response(data: OWMCurrentResponse) -> HuntingConditions {
    let weather = data.weather.first();
    let condition = weather.map(|w| w.main.clone()).unwrap_or_default();
    let description = weather.map(|w| w.description.clone()).unwrap_or_default();

    let temperature = Decimal::from_f64_retain(data.main.temp)
        .unwrap_or_default()
        .round_dp(1);
    let wind_speed = Decimal::from_f64_retain(data.wind.speed)
        .unwrap_or_default()
        .round_dp(1);

    HuntingConditions {
        rating: rate_conditions(temperature, wind_speed, &condition),
        temperature,
        wind_speed,
        conditions: description,
    }
}

/// Map a raw reading to a hunting-conditions rating. Cold, overcast
/// days with a working wind move birds; severe weather or unworkable
/// wind grounds the hunt.
pub fn rate_conditions(temperature: Decimal, wind_speed: Decimal, condition: &str) -> WeatherRating {
    if condition == "Thunderstorm" || wind_speed > Decimal::from(30) {
        return WeatherRating::Poor;
    }

    let overcast = matches!(
        condition,
        "Clouds" | "Rain" | "Drizzle" | "Snow" | "Mist" | "Fog"
    );
    let cold = temperature <= Decimal::from(60);
    let working_wind = wind_speed >= Decimal::from(8) && wind_speed <= Decimal::from(25);

    if overcast && cold && working_wind {
        WeatherRating::Excellent
    } else if cold && wind_speed >= Decimal::from(5) {
        WeatherRating::Good
    } else if temperature < Decimal::from(85) {
        WeatherRating::Fair
    } else {
        WeatherRating::Poor
    }
}
