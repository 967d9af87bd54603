use serde::{Deserialize, Serialize};

/// Weather condition buckets mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Fog,
    Rain,
    Snow,
    RainShowers,
    Thunderstorm,
    #[default]
    Cloudy,
}

impl WeatherCondition {
    /// Classify an Open-Meteo (WMO) weather code.
    /// Unlisted codes, negative ones included, are `Cloudy`.
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::PartlyCloudy,
            45..=48 => Self::Fog,
            51..=67 => Self::Rain,
            71..=77 => Self::Snow,
            80..=82 => Self::RainShowers,
            95..=99 => Self::Thunderstorm,
            _ => Self::Cloudy,
        }
    }

    /// pt-BR description as shown on the details card
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Ensolarado",
            Self::PartlyCloudy => "Parcialmente Nublado",
            Self::Fog => "Com Neblina",
            Self::Rain => "Chuvoso",
            Self::Snow => "Com Neve",
            Self::RainShowers => "Com Chuvas",
            Self::Thunderstorm => "Com Tempestade",
            Self::Cloudy => "Nublado",
        }
    }

    /// Ionicons name
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sunny",
            Self::PartlyCloudy => "partly-sunny",
            Self::Fog | Self::Cloudy => "cloudy",
            Self::Rain | Self::RainShowers => "rainy",
            Self::Snow => "snow",
            Self::Thunderstorm => "thunderstorm",
        }
    }

    /// Outline Ionicons variant used by the details view
    pub fn outline_icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sunny-outline",
            Self::PartlyCloudy => "partly-sunny-outline",
            Self::Fog | Self::Cloudy => "cloud-outline",
            Self::Rain | Self::RainShowers => "rainy-outline",
            Self::Snow => "snow-outline",
            Self::Thunderstorm => "thunderstorm-outline",
        }
    }
}

pub fn classify_weather(code: i32) -> WeatherCondition {
    WeatherCondition::from_wmo_code(code)
}

/// Time-of-day greeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// `[5,12)` morning, `[12,18)` afternoon, anything else evening.
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Morning => "Bom dia",
            Self::Afternoon => "Boa tarde",
            Self::Evening => "Boa noite",
        }
    }
}

pub fn greeting(hour: u32) -> Greeting {
    Greeting::for_hour(hour)
}
