use super::{ProviderClient, ProviderEndpoint, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const USER_AGENT: &str = concat!("jobnews/", env!("CARGO_PKG_VERSION"));

/// RapidAPI-style client: key and host travel as headers, the timeout comes
/// from the endpoint on every request.
#[derive(Debug, Clone)]
pub struct HttpProviderClient {
    client: Client,
}

impl HttpProviderClient {
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        Ok(Self { client })
    }

    fn classify(endpoint: &ProviderEndpoint, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                timeout: endpoint.timeout,
            }
        } else {
            ProviderError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl ProviderClient for HttpProviderClient {
    async fn get_json(
        &self,
        endpoint: &ProviderEndpoint,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, ProviderError> {
        let url = endpoint.url(path);
        debug!(provider = endpoint.name, %url, "calling provider");

        let response = self
            .client
            .get(&url)
            .header("X-RapidAPI-Key", endpoint.api_key.as_str())
            .header("X-RapidAPI-Host", endpoint.host.as_str())
            .query(params)
            .timeout(endpoint.timeout)
            .send()
            .await
            .map_err(|err| Self::classify(endpoint, err))?
            .error_for_status()
            .map_err(|err| Self::classify(endpoint, err))?;

        let body = response
            .bytes()
            .await
            .map_err(|err| Self::classify(endpoint, err))?;

        serde_json::from_slice(&body).map_err(|err| ProviderError::Parse(err.to_string()))
    }
}
