use crate::config::UiConfig;
use crate::models::Suggestion;
use anyhow::{Context, Result};
use reqwest::{Client, Url};
use tracing::{debug, warn};

#[cfg(not(target_arch = "wasm32"))]
use crate::search::traits::SuggestionSource;
#[cfg(not(target_arch = "wasm32"))]
use async_trait::async_trait;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// Suggestion source backed by the site's search endpoint
#[derive(Debug, Clone)]
pub struct HttpSuggestionSource {
    client: Client,
    endpoint: Url,
}

impl HttpSuggestionSource {
    /// Resolve the endpoint from the configured origin and search path
    pub fn new(config: &UiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base URL {:?}", config.base_url))?;
        let endpoint = base
            .join(&config.search_path)
            .with_context(|| format!("Invalid search path {:?}", config.search_path))?;
        Self::with_endpoint(endpoint)
    }

    pub fn with_endpoint(endpoint: Url) -> Result<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("hdb-search/", env!("CARGO_PKG_VERSION")));
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `GET {endpoint}?q={query}` and decode the JSON array of suggestions
    pub async fn fetch(&self, query: &str) -> Result<Vec<Suggestion>> {
        debug!("Fetching suggestions from {} for {:?}", self.endpoint, query);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("q", query)])
            .send()
            .await
            .context("Failed to reach suggestion endpoint")?;

        if !response.status().is_success() {
            warn!("Suggestion endpoint returned status: {}", response.status());
            anyhow::bail!("Suggestion request failed: {}", response.status());
        }

        let suggestions: Vec<Suggestion> = response
            .json()
            .await
            .context("Failed to decode suggestions")?;

        debug!("Received {} suggestions", suggestions.len());
        Ok(suggestions)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl SuggestionSource for HttpSuggestionSource {
    async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>> {
        self.fetch(query).await
    }

    fn source_name(&self) -> &'static str {
        "HTTP"
    }
}
