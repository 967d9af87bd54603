use anyhow::Result;
use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::cities::CityRepository;
use crate::client::OpenMeteoClient;
use crate::config::Config;
use crate::details::build_details;
use crate::error::{to_mcp_error, AppError};
use crate::formatters::{format_about, format_cities, format_details, format_home};
use crate::models::{
    AddCityRequest, City, CityDetails, CityDetailsRequest, RemoveCityRequest, SetUserNameRequest,
};
use crate::store::FileStore;

/// Weather-and-clock service exposed over MCP
#[derive(Clone)]
pub struct Weather {
    client: OpenMeteoClient,
    cities: Arc<CityRepository<FileStore>>,
    timezone: Tz,
    tool_router: ToolRouter<Self>,
}

impl Weather {
    /// Creates a new Weather service instance
    pub fn new(config: &Config) -> Result<Self> {
        let store = FileStore::new(&config.data_dir);
        tracing::info!("Using storage at {}", store.path().display());

        Ok(Self {
            client: OpenMeteoClient::new(config)?,
            cities: Arc::new(CityRepository::new(store)),
            timezone: config.timezone,
            tool_router: Self::tool_router(),
        })
    }

    /// Run a repository call on the blocking pool; the store does file I/O.
    async fn with_cities<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&CityRepository<FileStore>) -> Result<T> + Send + 'static,
    {
        let cities = Arc::clone(&self.cities);
        tokio::task::spawn_blocking(move || f(&cities)).await?
    }

    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.timezone)
    }

    /// Home screen. A failed weather batch falls back to loading placeholders.
    pub async fn home_view(&self) -> Result<String> {
        let cities = self.with_cities(|repo| repo.load()).await?;
        let weather = match self.client.current_weather_for_all(&cities).await {
            Ok(weather) => Some(weather),
            Err(e) => {
                tracing::error!("Failed to fetch weather data: {:#}", e);
                None
            }
        };
        Ok(format_home(&self.now(), &cities, weather.as_deref()))
    }

    pub async fn cities_view(&self) -> Result<String> {
        let cities = self.with_cities(|repo| repo.load()).await?;
        Ok(format_cities(&cities))
    }

    /// Geocode `name` and append the first hit to the list
    pub async fn add_city_by_name(&self, name: &str) -> Result<City> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EmptyCityName.into());
        }

        let hit = self
            .client
            .geocode(name)
            .await?
            .ok_or_else(|| AppError::CityNotFound(name.to_string()))?;

        let city = self
            .with_cities(move |repo| repo.add(&hit.name, hit.latitude, hit.longitude))
            .await?;
        tracing::info!("Added city {} ({}) at {}, {}", city.name, city.id, city.lat, city.lon);
        Ok(city)
    }

    pub async fn remove_city_by_id(&self, id: i64) -> Result<()> {
        if !self.with_cities(move |repo| repo.remove(id)).await? {
            return Err(AppError::UnknownCityId(id).into());
        }
        tracing::info!("Removed city {}", id);
        Ok(())
    }

    /// Details for a city id or name, hourly strip starting at `current_hour`
    pub async fn details_for(&self, query: &str, current_hour: u32) -> Result<CityDetails> {
        let query = query.to_string();
        let city = self.with_cities(move |repo| repo.find(&query)).await?;
        let forecast = self.client.forecast(city.lat, city.lon).await?;
        Ok(build_details(&city.name, &forecast, current_hour))
    }

    pub async fn details_view(&self, query: &str) -> Result<String> {
        let details = self.details_for(query, self.now().hour()).await?;
        Ok(format_details(&details))
    }

    pub async fn about_view(&self) -> Result<String> {
        let user_name = self.with_cities(|repo| repo.user_name()).await?;
        Ok(format_about(user_name.as_deref()))
    }

    pub async fn save_user_name(&self, name: &str) -> Result<String> {
        let name = name.to_string();
        self.with_cities(move |repo| repo.set_user_name(&name)).await
    }
}

fn failed(err: anyhow::Error, alert: &str) -> McpError {
    tracing::error!("{}: {:#}", alert, err);
    to_mcp_error(err, alert)
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "apex-weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: Some("Apex".to_string()),
                website_url: None,
            },
            instructions: Some(
                "Apex weather and clock. Shows the time, a greeting and current weather for a \
                saved list of cities (Open-Meteo), with hourly details per city."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    #[tool(description = "Home screen: greeting, current time and date, and current weather for every saved city.")]
    async fn home(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("Rendering home");

        let text = self
            .home_view()
            .await
            .map_err(|e| failed(e, "Erro ao carregar cidades"))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "List saved cities with their ids and coordinates.")]
    async fn list_cities(&self) -> Result<CallToolResult, McpError> {
        tracing::info!("Listing cities");

        let text = self
            .cities_view()
            .await
            .map_err(|e| failed(e, "Erro ao carregar cidades"))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Add a city by name (e.g. 'Curitiba'). The name is geocoded with Open-Meteo and the first match is saved.")]
    async fn add_city(
        &self,
        Parameters(request): Parameters<AddCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Adding city: {}", request.name);

        let city = self
            .add_city_by_name(&request.name)
            .await
            .map_err(|e| failed(e, "Não foi possível adicionar a cidade. Tente novamente."))?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "{} adicionada com sucesso! (id {})",
            city.name, city.id
        ))]))
    }

    #[tool(description = "Remove a saved city by id.")]
    async fn remove_city(
        &self,
        Parameters(request): Parameters<RemoveCityRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Removing city: {}", request.id);

        self.remove_city_by_id(request.id)
            .await
            .map_err(|e| failed(e, "Erro ao remover cidade"))?;

        let text = self
            .cities_view()
            .await
            .map_err(|e| failed(e, "Erro ao carregar cidades"))?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Cidade removida.\n\n{}",
            text
        ))]))
    }

    #[tool(description = "Weather details for one city: current conditions, wind, today's max/min and the next hours. Pass the city id or name.")]
    async fn city_details(
        &self,
        Parameters(request): Parameters<CityDetailsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting details for: {}", request.city);

        let text = self
            .details_view(&request.city)
            .await
            .map_err(|e| failed(e, "Erro ao buscar detalhes do clima"))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "About screen with the saved user name and app version.")]
    async fn about(&self) -> Result<CallToolResult, McpError> {
        let text = self
            .about_view()
            .await
            .map_err(|e| failed(e, "Erro ao carregar nome do usuário"))?;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Change the user name shown on the about screen.")]
    async fn set_user_name(
        &self,
        Parameters(request): Parameters<SetUserNameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let name = self
            .save_user_name(&request.name)
            .await
            .map_err(|e| failed(e, "Não foi possível salvar o nome"))?;

        tracing::info!("User name changed");
        Ok(CallToolResult::success(vec![Content::text(format!(
            "Nome alterado com sucesso! Olá, {}.",
            name
        ))]))
    }
}
