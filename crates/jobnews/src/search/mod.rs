//! Live-or-mock search orchestration for both domains.

pub mod jobs;
mod lenient;
pub mod news;

pub use jobs::{JobSearchGateway, JobSearchOutcome, JobSearchRequest};
pub use news::{NewsSearchEnvelope, NewsSearchGateway, NewsSearchRequest};

use crate::config::ProvidersConfig;
use crate::provider::{ProviderClient, ProviderEndpoint};
use serde::Serialize;
use std::sync::Arc;

pub const JSEARCH_PROVIDER: &str = "jsearch";
pub const NEWS_PROVIDER: &str = "news_api";

/// Origin tag carried by every envelope. Live and mock envelopes differ only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchSource {
    #[serde(rename = "jsearch")]
    JSearch,
    #[serde(rename = "news_api")]
    NewsApi,
    #[serde(rename = "mock")]
    Mock,
}

/// Both gateways sharing one provider client.
#[derive(Debug)]
pub struct SearchGateways<C> {
    pub jobs: JobSearchGateway<C>,
    pub news: NewsSearchGateway<C>,
}

impl<C: ProviderClient> SearchGateways<C> {
    pub fn from_config(config: &ProvidersConfig, client: Arc<C>) -> Self {
        Self {
            jobs: JobSearchGateway::new(
                client.clone(),
                ProviderEndpoint::from_config(JSEARCH_PROVIDER, &config.jobs),
            ),
            news: NewsSearchGateway::new(
                client,
                ProviderEndpoint::from_config(NEWS_PROVIDER, &config.news),
            ),
        }
    }
}

/// `{status, data}` wrapper both providers use.
#[derive(Debug, Default, serde::Deserialize)]
struct ProviderPayload {
    #[serde(default, deserialize_with = "lenient::value")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    data: Option<Vec<serde_json::Value>>,
}

impl ProviderPayload {
    const OK_STATUS: &'static str = "OK";

    fn is_ok(&self) -> bool {
        self.status.as_deref() == Some(Self::OK_STATUS)
    }

    /// Decodes each provider record, preserving order. A record that is not an
    /// object fails the whole batch.
    fn records<T: serde::de::DeserializeOwned>(self) -> Result<Vec<T>, serde_json::Error> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(serde_json::from_value)
            .collect()
    }
}
