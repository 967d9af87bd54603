use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

use crate::constants::{CITIES_KEY, DEFAULT_CITIES, USER_NAME_KEY};
use crate::error::AppError;
use crate::models::City;
use crate::store::KeyValueStore;

pub fn default_cities() -> Vec<City> {
    DEFAULT_CITIES
        .iter()
        .map(|(id, name, lat, lon)| City {
            id: *id,
            name: (*name).to_string(),
            lat: *lat,
            lon: *lon,
        })
        .collect()
}

/// Persisted city list and user name
#[derive(Debug)]
pub struct CityRepository<S> {
    store: S,
    /// Held across each read-modify-write of the city list
    list_lock: Mutex<()>,
}

impl<S: KeyValueStore> CityRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            list_lock: Mutex::new(()),
        }
    }

    fn lock_list(&self) -> Result<MutexGuard<'_, ()>> {
        self.list_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("City list lock poisoned"))
    }

    /// Load the saved list, seeding and persisting the defaults on first use.
    pub fn load(&self) -> Result<Vec<City>> {
        let _guard = self.lock_list()?;
        self.load_locked()
    }

    fn load_locked(&self) -> Result<Vec<City>> {
        let saved = self
            .store
            .get_item(CITIES_KEY)
            .context("Failed to read cities")?;

        match saved {
            Some(raw) => serde_json::from_str(&raw).context("Failed to parse saved cities"),
            None => {
                let cities = default_cities();
                self.save_locked(&cities)?;
                tracing::info!("Seeded {} default cities", cities.len());
                Ok(cities)
            }
        }
    }

    pub fn save(&self, cities: &[City]) -> Result<()> {
        let _guard = self.lock_list()?;
        self.save_locked(cities)
    }

    fn save_locked(&self, cities: &[City]) -> Result<()> {
        let raw = serde_json::to_string(cities)?;
        self.store
            .set_item(CITIES_KEY, &raw)
            .context("Failed to save cities")
    }

    /// Append a city with a fresh id
    pub fn add(&self, name: &str, lat: f64, lon: f64) -> Result<City> {
        let _guard = self.lock_list()?;
        let mut cities = self.load_locked()?;
        let next_id = cities
            .iter()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .context("No city ids left above the saved maximum")?;
        let city = City {
            id: Utc::now().timestamp_millis().max(next_id),
            name: name.to_string(),
            lat,
            lon,
        };
        cities.push(city.clone());
        self.save_locked(&cities)?;
        Ok(city)
    }

    /// Remove by id. Returns false when no city had that id.
    pub fn remove(&self, id: i64) -> Result<bool> {
        let _guard = self.lock_list()?;
        let mut cities = self.load_locked()?;
        let before = cities.len();
        cities.retain(|c| c.id != id);
        if cities.len() == before {
            return Ok(false);
        }
        self.save_locked(&cities)?;
        Ok(true)
    }

    /// Resolve by id, then by name in the saved list, then by name among the defaults.
    pub fn find(&self, query: &str) -> Result<City> {
        let query = query.trim();
        let cities = self.load()?;

        if let Ok(id) = query.parse::<i64>() {
            if let Some(city) = cities.iter().find(|c| c.id == id) {
                return Ok(city.clone());
            }
        }

        let by_name = |c: &&City| c.name.to_lowercase() == query.to_lowercase();
        cities
            .iter()
            .find(by_name)
            .cloned()
            .or_else(|| default_cities().iter().find(by_name).cloned())
            .ok_or_else(|| AppError::UnknownCity(query.to_string()).into())
    }

    pub fn user_name(&self) -> Result<Option<String>> {
        let name = self
            .store
            .get_item(USER_NAME_KEY)
            .context("Failed to read user name")?;
        Ok(name.filter(|n| !n.is_empty()))
    }

    /// Store the trimmed name and return it
    pub fn set_user_name(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EmptyUserName.into());
        }
        self.store
            .set_item(USER_NAME_KEY, name)
            .context("Failed to save user name")?;
        Ok(name.to_string())
    }
}
