//! Apex weather and clock
//!
//! Greeting, clock and current/hourly Open-Meteo weather for a saved list of
//! cities, served as MCP tools.

pub mod cities;
pub mod classify;
pub mod client;
pub mod config;
pub mod constants;
pub mod details;
pub mod error;
pub mod formatters;
pub mod models;
pub mod service;
pub mod store;

pub use classify::{classify_weather, greeting, Greeting, WeatherCondition};
pub use config::Config;
pub use service::Weather;
