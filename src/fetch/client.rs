use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use super::envelope::{classify_response, ResourceBody, SkipReason};
use crate::parser::EntityId;

pub const DEFAULT_BASE_URL: &str = "https://www.swapi.tech/api";
pub const DEFAULT_FIRST_PERSON_ID: EntityId = 1;
pub const DEFAULT_LAST_PERSON_ID: EntityId = 82;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The three catalog endpoints consumed by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    People,
    Vehicles,
    Starships,
}

impl Resource {
    pub fn path(self) -> &'static str {
        match self {
            Resource::People => "people",
            Resource::Vehicles => "vehicles",
            Resource::Starships => "starships",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Where to fetch from and which people to ask for
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub people_ids: RangeInclusive<EntityId>,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            people_ids: DEFAULT_FIRST_PERSON_ID..=DEFAULT_LAST_PERSON_ID,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Anything that can hand back one record per (resource, id)
pub trait ResourceSource {
    fn fetch(&self, resource: Resource, id: EntityId) -> Result<ResourceBody, SkipReason>;
}

pub struct SwapiClient {
    client: Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent("swapi-to-csv")
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `{base}/{resource}/{id}`
    pub fn resource_url(&self, resource: Resource, id: EntityId) -> String {
        format!("{}/{}/{}", self.base_url, resource.path(), id)
    }
}

impl ResourceSource for SwapiClient {
    fn fetch(&self, resource: Resource, id: EntityId) -> Result<ResourceBody, SkipReason> {
        let url = self.resource_url(resource, id);
        tracing::debug!(%url, "fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SkipReason::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| SkipReason::Transport(e.to_string()))?;

        classify_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url() {
        let config = ApiConfig {
            base_url: "http://localhost:9000/api/".to_string(),
            ..ApiConfig::default()
        };
        let client = SwapiClient::new(&config).unwrap();

        assert_eq!(
            client.resource_url(Resource::Starships, 12),
            "http://localhost:9000/api/starships/12"
        );
    }

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.people_ids, 1..=82);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_unreachable_host_is_a_transport_skip() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
            ..ApiConfig::default()
        };
        let client = SwapiClient::new(&config).unwrap();

        let result = client.fetch(Resource::People, 1);
        assert!(matches!(result, Err(SkipReason::Transport(_))));
    }
}
