//! Pet listing: fetch from the external endpoint, then search, filter and paginate in memory.

use std::sync::{Mutex, PoisonError};

use cached::{Cached, TimedCache};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::models::{Pet, PetId, PetStatus, PetType};

pub const DEFAULT_PAGE_SIZE: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("error sending pets request: {0}")]
    Network(String),
    #[error("pets endpoint answered with status {0}")]
    Status(u16),
    #[error("error parsing pets listing: {0}")]
    Decode(String),
    #[error("{0}")]
    InvalidQuery(String),
}

pub struct PetCatalogue {
    client: Client,
    pets_url: String,
    cache: Option<Mutex<TimedCache<String, Vec<Pet>>>>,
}

impl PetCatalogue {
    pub fn new(config: &ApiConfig) -> Self {
        let cache = (config.pets_cache_seconds > 0)
            .then(|| Mutex::new(TimedCache::with_lifespan(config.pets_cache_seconds)));
        info!(
            "Creating pet catalogue for '{}' (cache: {}s)",
            config.pets_url, config.pets_cache_seconds
        );
        Self {
            client: Client::new(),
            pets_url: config.pets_url.clone(),
            cache,
        }
    }

    /// The full listing, served from cache while it is fresh.
    pub async fn fetch(&self) -> Result<Vec<Pet>, CatalogueError> {
        if let Some(cache) = &self.cache {
            let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(pets) = cache.cache_get(&self.pets_url) {
                debug!("Serving {} pets from cache", pets.len());
                return Ok(pets.clone());
            }
        }

        let pets = self.query().await?;

        if let Some(cache) = &self.cache {
            let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.cache_set(self.pets_url.clone(), pets.clone());
        }
        Ok(pets)
    }

    /// One pet by id, looked up in the (cached) listing.
    pub async fn find(&self, pet_id: PetId) -> Result<Option<Pet>, CatalogueError> {
        let pets = self.fetch().await?;
        Ok(pets.into_iter().find(|pet| pet.id == pet_id))
    }

    async fn query(&self) -> Result<Vec<Pet>, CatalogueError> {
        debug!("Sending pets request to: {}", self.pets_url);
        let response = self
            .client
            .get(&self.pets_url)
            .send()
            .await
            .map_err(|e| CatalogueError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogueError::Status(response.status().as_u16()));
        }
        let body = response
            .text()
            .await
            .map_err(|e| CatalogueError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| CatalogueError::Decode(e.to_string()))
    }
}

/// Listing filters. Everything is optional; `page` is 1-based.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PetQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub pet_type: Option<PetType>,
    pub status: Option<PetStatus>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PetPage<T> {
    pub pets: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> PetPage<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PetPage<U> {
        PetPage {
            pets: self.pets.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

impl PetQuery {
    fn matches(&self, pet: &Pet, needle: Option<&str>) -> bool {
        let matches_search = needle
            .map(|n| pet.name.to_lowercase().contains(n) || pet.breed.to_lowercase().contains(n))
            .unwrap_or(true);
        let matches_type = self.pet_type.map(|t| t == pet.pet_type).unwrap_or(true);
        let matches_status = self.status.map(|s| s == pet.status).unwrap_or(true);
        matches_search && matches_type && matches_status
    }

    pub fn apply(&self, pets: Vec<Pet>) -> Result<PetPage<Pet>, CatalogueError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page == 0 {
            return Err(CatalogueError::InvalidQuery("page starts at 1".to_string()));
        }
        if page_size == 0 {
            return Err(CatalogueError::InvalidQuery(
                "page_size must be positive".to_string(),
            ));
        }

        let needle = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let filtered: Vec<Pet> = pets
            .into_iter()
            .filter(|pet| self.matches(pet, needle.as_deref()))
            .collect();

        let total = filtered.len();
        let total_pages = total.div_ceil(page_size);
        let pets = filtered
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();

        Ok(PetPage {
            pets,
            page,
            page_size,
            total,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn pet(id: i64, name: &str, breed: &str, pet_type: PetType, status: PetStatus) -> Pet {
        Pet {
            id,
            name: name.to_string(),
            breed: breed.to_string(),
            age: "1 year".to_string(),
            gender: "Female".to_string(),
            size: "Small".to_string(),
            color: "Black".to_string(),
            health_condition: "Healthy".to_string(),
            details: None,
            image: format!("/images/{}.jpg", id),
            status,
            pet_type,
            story: String::new(),
        }
    }

    fn shelter() -> Vec<Pet> {
        let mut pets = vec![
            pet(1, "Mochi", "Persian", PetType::Cat, PetStatus::Available),
            pet(2, "Bantay", "Aspin", PetType::Dog, PetStatus::Adopted),
            pet(3, "Luna", "Siamese", PetType::Cat, PetStatus::InTrial),
        ];
        for id in 4..=10 {
            pets.push(pet(id, &format!("Pup {}", id), "Labrador", PetType::Dog, PetStatus::Available));
        }
        pets
    }

    #[test]
    fn test_default_query_first_page() {
        let page = PetQuery::default().apply(shelter()).unwrap();
        assert_eq!(page.total, 10);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.pets.len(), 6);
        assert_eq!(page.pets[0].id, 1);
    }

    #[test]
    fn test_last_page_and_past_end() {
        let mut query = PetQuery {
            page: Some(2),
            ..Default::default()
        };
        let page = query.apply(shelter()).unwrap();
        assert_eq!(page.pets.iter().map(|p| p.id).collect::<Vec<_>>(), vec![7, 8, 9, 10]);

        query.page = Some(3);
        let page = query.apply(shelter()).unwrap();
        assert!(page.pets.is_empty());
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_or_breed() {
        let query = PetQuery {
            search: Some("  SIAM ".to_string()),
            ..Default::default()
        };
        let page = query.apply(shelter()).unwrap();
        assert_eq!(page.pets.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);

        let query = PetQuery {
            search: Some("mochi".to_string()),
            ..Default::default()
        };
        assert_eq!(query.apply(shelter()).unwrap().total, 1);
    }

    #[test]
    fn test_type_and_status_filters() {
        let query = PetQuery {
            pet_type: Some(PetType::Dog),
            status: Some(PetStatus::Available),
            page_size: Some(100),
            ..Default::default()
        };
        let page = query.apply(shelter()).unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 1);
        assert!(page.pets.iter().all(|p| p.pet_type == PetType::Dog));
    }

    #[test]
    fn test_zero_page_size_or_page_rejected() {
        let query = PetQuery {
            page_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(query.apply(shelter()), Err(CatalogueError::InvalidQuery(_))));
        let query = PetQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(matches!(query.apply(shelter()), Err(CatalogueError::InvalidQuery(_))));
    }

    fn api_config(pets_url: String, pets_cache_seconds: u64) -> ApiConfig {
        ApiConfig {
            base_url: "http://unused".to_string(),
            profile_path: "/api/auth/profile/".to_string(),
            login_path: "/api/auth/login/".to_string(),
            register_path: "/api/auth/register/".to_string(),
            pets_url,
            timeout_in_ms: 1000,
            pets_cache_seconds,
        }
    }

    /// Test that a cached catalogue only hits the endpoint once.
    #[tokio::test]
    async fn test_fetch_is_cached() {
        let mut server = Server::new_async().await;
        let body = serde_json::to_string(&shelter()).unwrap();
        let m = server
            .mock("GET", "/api/pets")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(1)
            .create_async()
            .await;

        let catalogue = PetCatalogue::new(&api_config(format!("{}/api/pets", server.url()), 60));
        assert_eq!(catalogue.fetch().await.unwrap().len(), 10);
        assert_eq!(catalogue.fetch().await.unwrap().len(), 10);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_find_uses_cached_listing() {
        let mut server = Server::new_async().await;
        let body = serde_json::to_string(&shelter()).unwrap();
        let m = server
            .mock("GET", "/api/pets")
            .with_status(200)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;

        let catalogue = PetCatalogue::new(&api_config(format!("{}/api/pets", server.url()), 60));
        let luna = catalogue.find(3).await.unwrap().unwrap();
        assert_eq!(luna.name, "Luna");
        assert_eq!(catalogue.find(99).await.unwrap(), None);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/pets")
            .with_status(500)
            .create_async()
            .await;

        let catalogue = PetCatalogue::new(&api_config(format!("{}/api/pets", server.url()), 0));
        assert!(matches!(catalogue.fetch().await, Err(CatalogueError::Status(500))));
    }
}
