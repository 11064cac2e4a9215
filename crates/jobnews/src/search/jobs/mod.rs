mod mock;
mod normalizer;

pub use mock::{generate_mock_jobs, MOCK_JOB_COUNT};
pub use normalizer::{normalize_job, RawJob};

use super::{ProviderPayload, SearchSource};
use crate::provider::{ProviderClient, ProviderEndpoint, ProviderError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

const SEARCH_PATH: &str = "/search";

pub const NON_OK_STATUS_MESSAGE: &str = "API returned non-OK status";
pub const TIMEOUT_MESSAGE: &str = "API timeout - try again";

/// Salary figures arrive either as numbers or as free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SalaryValue {
    Amount(serde_json::Number),
    Text(String),
}

impl SalaryValue {
    pub const NOT_SPECIFIED: &'static str = "Not specified";

    pub fn not_specified() -> Self {
        Self::Text(Self::NOT_SPECIFIED.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOption {
    pub publisher: String,
    pub link: String,
    pub is_direct: bool,
}

/// Canonical job listing. Every field is always serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub is_remote: bool,
    pub employment_type: String,
    pub posted: String,
    pub posted_utc: String,
    pub description: String,
    pub salary: Option<SalaryValue>,
    pub min_salary: Option<SalaryValue>,
    pub max_salary: Option<SalaryValue>,
    pub salary_period: String,
    pub apply_link: String,
    pub apply_options: Vec<ApplyOption>,
    pub qualifications: Vec<String>,
    pub responsibilities: Vec<String>,
    pub benefits: Vec<String>,
    pub company_logo: String,
    pub company_website: String,
    pub google_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobSearchEnvelope {
    pub source: SearchSource,
    pub query: String,
    pub page: u32,
    pub total: usize,
    pub results: Vec<Job>,
}

/// Either an envelope of results or a reported, non-fatal failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JobSearchOutcome {
    Results(JobSearchEnvelope),
    Failed { error: String },
}

impl JobSearchOutcome {
    fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSearchRequest {
    pub query: String,
    pub page: u32,
    pub num_pages: u32,
}

impl JobSearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            num_pages: 1,
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_num_pages(mut self, num_pages: u32) -> Self {
        self.num_pages = num_pages;
        self
    }

    fn provider_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("num_pages", self.num_pages.to_string()),
        ]
    }
}

#[derive(Debug)]
pub struct JobSearchGateway<C> {
    client: Arc<C>,
    endpoint: Option<ProviderEndpoint>,
}

impl<C: ProviderClient> JobSearchGateway<C> {
    /// Without an endpoint every search is served from mock data.
    pub fn new(client: Arc<C>, endpoint: Option<ProviderEndpoint>) -> Self {
        Self { client, endpoint }
    }

    pub fn is_live(&self) -> bool {
        self.endpoint.is_some()
    }

    pub async fn search(&self, request: &JobSearchRequest) -> JobSearchOutcome {
        let Some(endpoint) = &self.endpoint else {
            debug!(query = %request.query, "job provider key not set; serving mock listings");
            return JobSearchOutcome::Results(generate_mock_jobs(&request.query, request.page));
        };

        match self.fetch(endpoint, request).await {
            Ok(outcome) => outcome,
            Err(ProviderError::Timeout { timeout }) => {
                warn!(provider = endpoint.name, query = %request.query, ?timeout, "job search timed out");
                JobSearchOutcome::failed(TIMEOUT_MESSAGE)
            }
            Err(err) => {
                warn!(provider = endpoint.name, query = %request.query, error = %err, "job search failed");
                JobSearchOutcome::failed(err.to_string())
            }
        }
    }

    async fn fetch(
        &self,
        endpoint: &ProviderEndpoint,
        request: &JobSearchRequest,
    ) -> Result<JobSearchOutcome, ProviderError> {
        let body = self
            .client
            .get_json(endpoint, SEARCH_PATH, &request.provider_params())
            .await?;

        let payload: ProviderPayload =
            serde_json::from_value(body).map_err(|err| ProviderError::Parse(err.to_string()))?;
        if !payload.is_ok() {
            warn!(provider = endpoint.name, status = ?payload.status, "job provider reported non-OK status");
            return Ok(JobSearchOutcome::failed(NON_OK_STATUS_MESSAGE));
        }

        let results: Vec<Job> = payload
            .records::<RawJob>()
            .map_err(|err| ProviderError::Parse(err.to_string()))?
            .into_iter()
            .map(normalize_job)
            .collect();

        info!(provider = endpoint.name, query = %request.query, count = results.len(), "job search complete");

        Ok(JobSearchOutcome::Results(JobSearchEnvelope {
            source: SearchSource::JSearch,
            query: request.query.clone(),
            page: request.page,
            total: results.len(),
            results,
        }))
    }
}
