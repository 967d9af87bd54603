use anyhow::{Context, Result};
use futures::future::join_all;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::models::{
    City, CityWeather, ForecastResponse, GeocodingResponse, GeocodingResult, WeatherSnapshot,
};

/// Forecast and geocoding calls against Open-Meteo
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Arc<Client>,
    forecast_base: String,
    geocoding_base: String,
    timezone: String,
}

impl OpenMeteoClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            forecast_base: config.forecast_api_base.clone(),
            geocoding_base: config.geocoding_api_base.clone(),
            timezone: config.timezone_name().to_string(),
        })
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn make_request<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("Request failed with status: {}", response.status());
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    fn forecast_url(&self, params: &[(&str, String)]) -> Result<Url> {
        let base = format!("{}/forecast", self.forecast_base);
        Url::parse_with_params(&base, params).with_context(|| format!("Invalid forecast URL {}", base))
    }

    /// Current conditions only
    pub async fn current_weather(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot> {
        let url = self.forecast_url(&[
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("current_weather", "true".to_string()),
        ])?;

        let forecast = self.make_request::<ForecastResponse>(url).await?;
        Ok(WeatherSnapshot::from(&forecast.current_weather))
    }

    /// Current conditions plus today's hourly series in the configured timezone
    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<ForecastResponse> {
        let url = self.forecast_url(&[
            ("latitude", lat.to_string()),
            ("longitude", lon.to_string()),
            ("current_weather", "true".to_string()),
            ("hourly", "temperature_2m,weathercode".to_string()),
            ("timezone", self.timezone.clone()),
            ("forecast_days", "1".to_string()),
        ])?;

        self.make_request(url).await
    }

    /// First geocoding hit for `name`, if any
    pub async fn geocode(&self, name: &str) -> Result<Option<GeocodingResult>> {
        let base = format!("{}/search", self.geocoding_base);
        let url = Url::parse_with_params(
            &base,
            &[
                ("name", name),
                ("count", "1"),
                ("language", "pt"),
                ("format", "json"),
            ],
        )
        .with_context(|| format!("Invalid geocoding URL {}", base))?;

        let response = self.make_request::<GeocodingResponse>(url).await?;
        Ok(response.results.and_then(|r| r.into_iter().next()))
    }

    /// Fetch every city concurrently. Results keep the input order; one
    /// failure fails the whole batch.
    pub async fn current_weather_for_all(&self, cities: &[City]) -> Result<Vec<CityWeather>> {
        let fetches = cities.iter().map(|city| async move {
            let snapshot = self
                .current_weather(city.lat, city.lon)
                .await
                .with_context(|| format!("Failed to fetch weather for {}", city.name))?;
            Ok::<_, anyhow::Error>(CityWeather {
                city: city.clone(),
                snapshot,
            })
        });

        join_all(fetches).await.into_iter().collect()
    }
}
