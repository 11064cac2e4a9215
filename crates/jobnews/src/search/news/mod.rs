mod mock;
mod normalizer;

pub use mock::generate_mock_news;
pub use normalizer::{normalize_article, RawArticle};

use super::{ProviderPayload, SearchSource};
use crate::provider::{ProviderClient, ProviderEndpoint, ProviderError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

const SEARCH_PATH: &str = "/search";

/// Upper bound on generated mock articles. Live requests forward `limit` as given.
pub const MAX_MOCK_ARTICLES: u32 = 100;

/// Canonical news article. Every field is always serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub source_name: String,
    pub source_url: String,
    pub published: String,
    pub summary: String,
    pub image: String,
    pub link: String,
    pub author: String,
}

/// News response body. A non-OK provider status yields only
/// `news_available` and `articles`; a failed call adds `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsSearchEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SearchSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub news_available: bool,
    pub articles: Vec<Article>,
}

impl NewsSearchEnvelope {
    fn unavailable() -> Self {
        Self {
            error: None,
            source: None,
            query: None,
            news_available: false,
            articles: Vec::new(),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            error: Some(message),
            ..Self::unavailable()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsSearchRequest {
    pub query: String,
    pub limit: u32,
    pub time_published: String,
    pub country: String,
    pub lang: String,
}

impl NewsSearchRequest {
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: Self::DEFAULT_LIMIT,
            time_published: "anytime".to_string(),
            country: "US".to_string(),
            lang: "en".to_string(),
        }
    }

    fn provider_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("limit", self.limit.to_string()),
            ("time_published", self.time_published.clone()),
            ("country", self.country.clone()),
            ("lang", self.lang.clone()),
        ]
    }
}

#[derive(Debug)]
pub struct NewsSearchGateway<C> {
    client: Arc<C>,
    endpoint: Option<ProviderEndpoint>,
}

impl<C: ProviderClient> NewsSearchGateway<C> {
    /// Without an endpoint every search is served from mock data.
    pub fn new(client: Arc<C>, endpoint: Option<ProviderEndpoint>) -> Self {
        Self { client, endpoint }
    }

    pub fn is_live(&self) -> bool {
        self.endpoint.is_some()
    }

    pub async fn search(&self, request: &NewsSearchRequest) -> NewsSearchEnvelope {
        let Some(endpoint) = &self.endpoint else {
            debug!(query = %request.query, limit = request.limit, "news provider key not set; serving mock articles");
            return generate_mock_news(&request.query, request.limit.min(MAX_MOCK_ARTICLES));
        };

        match self.fetch(endpoint, request).await {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(provider = endpoint.name, query = %request.query, error = %err, "news search failed");
                NewsSearchEnvelope::failed(err.to_string())
            }
        }
    }

    async fn fetch(
        &self,
        endpoint: &ProviderEndpoint,
        request: &NewsSearchRequest,
    ) -> Result<NewsSearchEnvelope, ProviderError> {
        let body = self
            .client
            .get_json(endpoint, SEARCH_PATH, &request.provider_params())
            .await?;

        let payload: ProviderPayload =
            serde_json::from_value(body).map_err(|err| ProviderError::Parse(err.to_string()))?;
        if !payload.is_ok() {
            // Reported as "no news" rather than as an error, unlike job search.
            warn!(provider = endpoint.name, status = ?payload.status, "news provider reported non-OK status");
            return Ok(NewsSearchEnvelope::unavailable());
        }

        let articles: Vec<Article> = payload
            .records::<RawArticle>()
            .map_err(|err| ProviderError::Parse(err.to_string()))?
            .into_iter()
            .map(normalize_article)
            .collect();

        info!(provider = endpoint.name, query = %request.query, count = articles.len(), "news search complete");

        Ok(NewsSearchEnvelope {
            error: None,
            source: Some(SearchSource::NewsApi),
            query: Some(request.query.clone()),
            news_available: !articles.is_empty(),
            articles,
        })
    }
}
