//! Outbound calls to the search providers.

mod http;

pub use http::HttpProviderClient;

use crate::config::ProviderConfig;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Everything needed to address one provider: where it lives, how to
/// authenticate, and how long a single call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoint {
    pub name: &'static str,
    pub base_url: String,
    pub host: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ProviderEndpoint {
    /// Returns `None` when the provider has no key, which selects mock mode.
    pub fn from_config(name: &'static str, config: &ProviderConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            name,
            base_url: config.resolved_base_url(),
            host: config.host.clone(),
            api_key,
            timeout: config.timeout,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider did not respond within {}s", .timeout.as_secs())]
    Timeout { timeout: Duration },
    #[error("{0}")]
    Transport(String),
    #[error("provider returned invalid JSON: {0}")]
    Parse(String),
}

/// Single-attempt JSON GET against a provider. Implementations never retry.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn get_json(
        &self,
        endpoint: &ProviderEndpoint,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, ProviderError>;
}
