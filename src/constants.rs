/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("apex-weather/", env!("CARGO_PKG_VERSION"));

/// Open-Meteo forecast API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Open-Meteo geocoding API base URL
pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";

/// Timezone used for hourly forecasts and the wall clock
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Directory name under the platform data dir
pub const DATA_DIR_NAME: &str = "apex-weather";

/// Storage keys
pub const CITIES_KEY: &str = "cities";
pub const USER_NAME_KEY: &str = "userName";

/// Number of hourly entries shown on the details view, starting at the current hour
pub const HOURLY_WINDOW: usize = 7;

/// Cities written on first launch: (id, name, lat, lon)
pub const DEFAULT_CITIES: [(i64, &str, f64, f64); 4] = [
    (1, "Valinhos", -22.97, -46.99),
    (2, "Campinas", -22.91, -47.06),
    (3, "São Paulo", -23.55, -46.63),
    (4, "Brasília", -15.79, -47.89),
];
