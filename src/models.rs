use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::classify::WeatherCondition;

// ============================================================================
// Domain Models
// ============================================================================

/// A named point the user tracks weather for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// Point-in-time reading for one city
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherSnapshot {
    /// Rounded °C
    pub temperature: i32,
    pub weather_code: i32,
    pub wind_speed_kmh: f64,
}

impl WeatherSnapshot {
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.weather_code)
    }
}

impl From<&CurrentWeather> for WeatherSnapshot {
    fn from(current: &CurrentWeather) -> Self {
        Self {
            temperature: current.temperature.round() as i32,
            weather_code: current.weathercode,
            wind_speed_kmh: current.windspeed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPoint {
    pub hour: u32,
    pub temperature: i32,
    pub weather_code: i32,
}

/// One card of the home carousel
#[derive(Debug, Clone, PartialEq)]
pub struct CityWeather {
    pub city: City,
    pub snapshot: WeatherSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CityDetails {
    pub city_name: String,
    pub current: WeatherSnapshot,
    pub hourly: Vec<HourlyPoint>,
    pub max_temp: i32,
    pub min_temp: i32,
}

// ============================================================================
// Open-Meteo API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current_weather: CurrentWeather,
    #[serde(default)]
    pub hourly: Option<HourlyData>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub weathercode: i32,
    pub windspeed: f64,
}

#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub weathercode: Vec<i32>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AddCityRequest {
    /// City name to look up, e.g. "Curitiba"
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct RemoveCityRequest {
    pub id: i64,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CityDetailsRequest {
    /// City id from list_cities, or its name
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct SetUserNameRequest {
    pub name: String,
}
