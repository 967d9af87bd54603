//! Open-Meteo client tests against a WireMock server

use std::time::Duration;

use apex_weather::client::OpenMeteoClient;
use apex_weather::models::City;
use apex_weather::Config;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config(base_url: &str) -> Config {
    Config {
        forecast_api_base: format!("{}/v1", base_url),
        geocoding_api_base: format!("{}/geo/v1", base_url),
        http_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

fn current_weather_response(temperature: f64, code: i32, wind: f64) -> serde_json::Value {
    serde_json::json!({
        "latitude": -22.97,
        "longitude": -46.99,
        "current_weather": {
            "temperature": temperature,
            "weathercode": code,
            "windspeed": wind,
            "winddirection": 120,
            "time": "2025-03-10T14:00"
        }
    })
}

fn city(id: i64, name: &str, lat: f64, lon: f64) -> City {
    City {
        id,
        name: name.to_string(),
        lat,
        lon,
    }
}

// =============================================================================
// Forecast Tests
// =============================================================================

#[tokio::test]
async fn test_current_weather_rounds_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-22.97"))
        .and(query_param("longitude", "-46.99"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_response(26.5, 61, 9.7)))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server.uri())).unwrap();
    let snapshot = client.current_weather(-22.97, -46.99).await.unwrap();

    assert_eq!(snapshot.temperature, 27);
    assert_eq!(snapshot.weather_code, 61);
    assert_eq!(snapshot.wind_speed_kmh, 9.7);
}

#[tokio::test]
async fn test_forecast_requests_hourly_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("hourly", "temperature_2m,weathercode"))
        .and(query_param("timezone", "America/Sao_Paulo"))
        .and(query_param("forecast_days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": { "temperature": 18.2, "weathercode": 3, "windspeed": 4.0 },
            "hourly": {
                "time": ["2025-03-10T00:00", "2025-03-10T01:00"],
                "temperature_2m": [17.0, 16.4],
                "weathercode": [3, 45]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server.uri())).unwrap();
    let forecast = client.forecast(-23.55, -46.63).await.unwrap();

    let hourly = forecast.hourly.unwrap();
    assert_eq!(hourly.time.len(), 2);
    assert_eq!(hourly.weathercode, vec![3, 45]);
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server.uri())).unwrap();
    let err = client.current_weather(0.0, 0.0).await.unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_batch_keeps_input_order() {
    let server = MockServer::start().await;
    // the first city answers last
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-22.97"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(current_weather_response(30.0, 0, 3.0))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-22.91"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_response(20.0, 95, 3.0)))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server.uri())).unwrap();
    let cities = vec![
        city(1, "Valinhos", -22.97, -46.99),
        city(2, "Campinas", -22.91, -47.06),
    ];
    let weather = client.current_weather_for_all(&cities).await.unwrap();

    assert_eq!(weather.len(), 2);
    assert_eq!(weather[0].city.name, "Valinhos");
    assert_eq!(weather[0].snapshot.temperature, 30);
    assert_eq!(weather[1].city.name, "Campinas");
    assert_eq!(weather[1].snapshot.weather_code, 95);
}

#[tokio::test]
async fn test_batch_fails_when_one_city_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-22.97"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_response(30.0, 0, 3.0)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-22.91"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server.uri())).unwrap();
    let cities = vec![
        city(1, "Valinhos", -22.97, -46.99),
        city(2, "Campinas", -22.91, -47.06),
    ];
    let err = client.current_weather_for_all(&cities).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Campinas"));
}

// =============================================================================
// Geocoding Tests
// =============================================================================

#[tokio::test]
async fn test_geocode_returns_first_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/v1/search"))
        .and(query_param("name", "Curitiba"))
        .and(query_param("count", "1"))
        .and(query_param("language", "pt"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                { "id": 6322752, "name": "Curitiba", "latitude": -25.42778, "longitude": -49.27306, "country": "Brasil" }
            ],
            "generationtime_ms": 0.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server.uri())).unwrap();
    let hit = client.geocode("Curitiba").await.unwrap().unwrap();

    assert_eq!(hit.name, "Curitiba");
    assert_eq!(hit.latitude, -25.42778);
    assert_eq!(hit.longitude, -49.27306);
}

#[tokio::test]
async fn test_geocode_without_results_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "generationtime_ms": 0.3
        })))
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server.uri())).unwrap();
    assert!(client.geocode("Xyzzyville").await.unwrap().is_none());
}

#[tokio::test]
async fn test_geocode_encodes_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo/v1/search"))
        .and(query_param("name", "São José dos Campos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenMeteoClient::new(&test_config(&server.uri())).unwrap();
    assert!(client.geocode("São José dos Campos").await.unwrap().is_none());
}
