use chrono::{NaiveDateTime, Timelike};

use crate::constants::HOURLY_WINDOW;
use crate::models::{CityDetails, ForecastResponse, HourlyPoint, WeatherSnapshot};

const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Assemble the details view from a forecast, starting the hourly strip at `current_hour`.
pub fn build_details(city_name: &str, forecast: &ForecastResponse, current_hour: u32) -> CityDetails {
    let current = WeatherSnapshot::from(&forecast.current_weather);

    let Some(hourly) = &forecast.hourly else {
        return CityDetails {
            city_name: city_name.to_string(),
            current,
            hourly: Vec::new(),
            max_temp: current.temperature,
            min_temp: current.temperature,
        };
    };

    let len = hourly
        .time
        .len()
        .min(hourly.temperature_2m.len())
        .min(hourly.weathercode.len());
    let start = (current_hour as usize).min(len);
    let end = (start + HOURLY_WINDOW).min(len);

    let points = (start..end)
        .map(|i| HourlyPoint {
            hour: parse_hour(&hourly.time[i]).unwrap_or((i % 24) as u32),
            temperature: hourly.temperature_2m[i].round() as i32,
            weather_code: hourly.weathercode[i],
        })
        .collect();

    let temps = &hourly.temperature_2m[..len];
    let (max_temp, min_temp) = if temps.is_empty() {
        (current.temperature, current.temperature)
    } else {
        let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
        (max.round() as i32, min.round() as i32)
    };

    CityDetails {
        city_name: city_name.to_string(),
        current,
        hourly: points,
        max_temp,
        min_temp,
    }
}

fn parse_hour(time: &str) -> Option<u32> {
    NaiveDateTime::parse_from_str(time, HOURLY_TIME_FORMAT)
        .ok()
        .map(|t| t.hour())
}
