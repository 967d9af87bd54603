use chrono::{DateTime, TimeZone, Timelike};

use crate::classify::{classify_weather, Greeting};
use crate::models::{City, CityDetails, CityWeather};

/// Formats the home screen: greeting, clock and one card per city.
/// `weather` is `None` while loading or after a failed fetch.
pub fn format_home<Tz: TimeZone>(
    now: &DateTime<Tz>,
    cities: &[City],
    weather: Option<&[CityWeather]>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let greeting = Greeting::for_hour(now.hour());
    let mut output = format!("{}! 👋\n", greeting.text());

    match weather.and_then(|w| w.first()) {
        Some(today) => {
            let condition = today.snapshot.condition();
            output.push_str(&format!(
                "[{}] Hoje será {}\n\n",
                condition.icon_name(),
                condition.description().to_lowercase()
            ));
        }
        None => output.push_str("[cloudy] Carregando informações do clima...\n\n"),
    }

    output.push_str(&format!(
        "{}\n{}\n\nCidades\n",
        now.format("%H:%M:%S"),
        now.format("%d/%m/%Y")
    ));

    match weather {
        Some(weather) => {
            for item in weather {
                output.push_str(&format!(
                    "  {}: [{}] {}°\n",
                    item.city.name,
                    item.snapshot.condition().icon_name(),
                    item.snapshot.temperature
                ));
            }
        }
        None => {
            for city in cities {
                output.push_str(&format!("  {}: [hourglass] --°\n", city.name));
            }
        }
    }
    output
}

/// Formats the saved city list
pub fn format_cities(cities: &[City]) -> String {
    let plural = if cities.len() != 1 { "s" } else { "" };
    let mut output = format!(
        "Minhas Cidades\n{} cidade{} salva{}\n\n",
        cities.len(),
        plural,
        plural
    );
    for city in cities {
        output.push_str(&format!(
            "  #{} {} ({:.2}°, {:.2}°)\n",
            city.id, city.name, city.lat, city.lon
        ));
    }
    output
}

/// Formats the per-city details screen
pub fn format_details(details: &CityDetails) -> String {
    let condition = details.current.condition();
    let mut output = format!(
        "{}\n{}° {} [{}]\nMáx: {}°  Min: {}°\n\n",
        details.city_name,
        details.current.temperature,
        condition.description(),
        condition.outline_icon_name(),
        details.max_temp,
        details.min_temp
    );

    output.push_str(&format!(
        "As rajadas de vento estão a {} km/h.\n\n",
        details.current.wind_speed_kmh.round() as i64
    ));

    for (i, point) in details.hourly.iter().enumerate() {
        let label = if i == 0 {
            "Agora".to_string()
        } else {
            point.hour.to_string()
        };
        output.push_str(&format!(
            "  {:>5}  [{}] {}°\n",
            label,
            classify_weather(point.weather_code).outline_icon_name(),
            point.temperature
        ));
    }
    output
}

/// Formats the about screen
pub fn format_about(user_name: Option<&str>) -> String {
    format!(
        "Sobre o Apex\n\
         Apex é seu aplicativo completo de clima e relógio inteligente, oferecendo \
         informações precisas e em tempo real sobre as condições climáticas.\n\n\
         - Clima em Tempo Real: Informações atualizadas de temperatura e condições climáticas\n\
         - Relógio Inteligente: Hora e data sempre precisas e visíveis\n\
         - Múltiplas Cidades: Acompanhe o clima em várias localidades\n\n\
         Seu nome: {}\n\n\
         Versão {}\n",
        user_name.unwrap_or("Não definido"),
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HourlyPoint, WeatherSnapshot};
    use chrono::FixedOffset;

    fn city(id: i64, name: &str) -> City {
        City {
            id,
            name: name.to_string(),
            lat: -22.971,
            lon: -46.996,
        }
    }

    fn at(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 10, hour, 5, 9)
            .unwrap()
    }

    #[test]
    fn test_home_with_weather() {
        let cities = vec![city(1, "Valinhos"), city(2, "Campinas")];
        let weather = vec![
            CityWeather {
                city: cities[0].clone(),
                snapshot: WeatherSnapshot { temperature: 28, weather_code: 0, wind_speed_kmh: 5.0 },
            },
            CityWeather {
                city: cities[1].clone(),
                snapshot: WeatherSnapshot { temperature: 19, weather_code: 63, wind_speed_kmh: 5.0 },
            },
        ];
        let text = format_home(&at(9), &cities, Some(weather.as_slice()));
        assert!(text.starts_with("Bom dia! 👋"));
        assert!(text.contains("Hoje será ensolarado"));
        assert!(text.contains("09:05:09"));
        assert!(text.contains("10/03/2025"));
        assert!(text.contains("Valinhos: [sunny] 28°"));
        assert!(text.contains("Campinas: [rainy] 19°"));
    }

    #[test]
    fn test_home_loading_placeholders() {
        let cities = vec![city(1, "Valinhos")];
        let text = format_home(&at(20), &cities, None);
        assert!(text.starts_with("Boa noite!"));
        assert!(text.contains("Carregando informações do clima..."));
        assert!(text.contains("Valinhos: [hourglass] --°"));
    }

    #[test]
    fn test_cities_pluralization() {
        assert!(format_cities(&[city(1, "Valinhos")]).contains("1 cidade salva\n"));
        assert!(format_cities(&[]).contains("0 cidades salvas"));
        let text = format_cities(&[city(1, "Valinhos"), city(7, "Campinas")]);
        assert!(text.contains("2 cidades salvas"));
        assert!(text.contains("#7 Campinas (-22.97°, -47.00°)"));
    }

    #[test]
    fn test_details() {
        let details = CityDetails {
            city_name: "São Paulo".into(),
            current: WeatherSnapshot { temperature: 24, weather_code: 95, wind_speed_kmh: 17.6 },
            hourly: vec![
                HourlyPoint { hour: 14, temperature: 24, weather_code: 95 },
                HourlyPoint { hour: 15, temperature: 23, weather_code: 3 },
            ],
            max_temp: 27,
            min_temp: 18,
        };
        let text = format_details(&details);
        assert!(text.contains("24° Com Tempestade [thunderstorm-outline]"));
        assert!(text.contains("Máx: 27°  Min: 18°"));
        assert!(text.contains("18 km/h"));
        assert!(text.contains("Agora  [thunderstorm-outline] 24°"));
        assert!(text.contains("15  [partly-sunny-outline] 23°"));
    }

    #[test]
    fn test_about() {
        assert!(format_about(None).contains("Seu nome: Não definido"));
        let text = format_about(Some("Ana"));
        assert!(text.contains("Seu nome: Ana"));
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
    }
}
