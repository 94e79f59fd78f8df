use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    Client,
};
use serde_json::Value;
use shared::{
    domain::{BlogPost, Project, TechHub, TechSteward},
    protocol::{
        ContactMessage, DonationRecord, EWastePickupRequest, Submission, TechHubApplication,
    },
};
use tracing::{debug, error, info, warn};

pub mod config;
pub mod demo;
pub mod error;
pub mod normalize;
pub mod transport;
pub mod types;

pub use config::{Backend, BackendUnavailablePolicy, ClientConfig};
pub use error::ClientError;
pub use types::BlogQuery;

use transport::{read_json, JSON_MEDIA_TYPE};

const PROJECTS_ROUTE: &str = "v2/projects";
const TECH_STEWARDS_ROUTE: &str = "v2/tech-stewards";
const POSTS_ROUTE: &str = "v2/posts";
const TECH_HUBS_ROUTE: &str = "tech-hubs";

/// Everything the site reads from and writes to its backends.
#[async_trait]
pub trait SiteApi: Send + Sync {
    async fn fetch_projects(&self) -> Result<Vec<Project>, ClientError>;
    async fn fetch_tech_stewards(&self) -> Result<Vec<TechSteward>, ClientError>;
    async fn fetch_blog_posts(&self, query: &BlogQuery) -> Result<Vec<BlogPost>, ClientError>;
    async fn fetch_tech_hubs(&self) -> Result<Vec<TechHub>, ClientError>;
    async fn probe(&self, backend: Backend) -> bool;
    async fn submit_tech_hub_application(
        &self,
        application: &TechHubApplication,
    ) -> Result<Value, ClientError>;
    async fn schedule_ewaste_pickup(
        &self,
        pickup: &EWastePickupRequest,
    ) -> Result<Value, ClientError>;
    async fn submit_contact_form(&self, message: &ContactMessage) -> Result<Value, ClientError>;
    async fn process_donation(&self, donation: &DonationRecord) -> Result<Value, ClientError>;
}

/// HTTP client for the content and transactional backends.
///
/// Holds no per-call state; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct SiteClient {
    http: Client,
    config: ClientConfig,
}

impl SiteClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(Client::new(), config)
    }

    pub fn with_http_client(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn fetch_projects(&self) -> Result<Vec<Project>, ClientError> {
        let endpoint = self.config.endpoint(Backend::Content, PROJECTS_ROUTE);
        let result = self
            .get_json(&endpoint, None)
            .await
            .and_then(|body| decode(&endpoint, normalize::projects(body)));
        self.resolve_listing("projects", result, demo::demo_projects)
    }

    pub async fn fetch_tech_stewards(&self) -> Result<Vec<TechSteward>, ClientError> {
        let endpoint = self.config.endpoint(Backend::Content, TECH_STEWARDS_ROUTE);
        let result = self
            .get_json(&endpoint, None)
            .await
            .and_then(|body| decode(&endpoint, normalize::tech_stewards(body)));
        self.resolve_listing("tech_stewards", result, demo::demo_tech_stewards)
    }

    pub async fn fetch_blog_posts(&self, query: &BlogQuery) -> Result<Vec<BlogPost>, ClientError> {
        let endpoint = self.config.endpoint(Backend::Content, POSTS_ROUTE);
        let result = self
            .get_json(&endpoint, Some(query.to_pairs().as_slice()))
            .await
            .and_then(|body| decode(&endpoint, serde_json::from_value::<Vec<BlogPost>>(body)));
        self.resolve_listing("blog_posts", result, Vec::new)
    }

    pub async fn fetch_tech_hubs(&self) -> Result<Vec<TechHub>, ClientError> {
        let endpoint = self.config.endpoint(Backend::Transactional, TECH_HUBS_ROUTE);
        let result = self
            .get_json(&endpoint, None)
            .await
            .and_then(|body| decode(&endpoint, serde_json::from_value::<Vec<TechHub>>(body)));
        self.resolve_listing("tech_hubs", result, Vec::new)
    }

    /// `HEAD` on the backend base url; any failure reads as unavailable.
    pub async fn probe(&self, backend: Backend) -> bool {
        let url = self.config.base_url(backend).clone();
        match self.http.head(url).send().await {
            Ok(response) => {
                let available = response.status().is_success();
                debug!(
                    backend = backend.as_str(),
                    status = response.status().as_u16(),
                    available,
                    "backend probe"
                );
                available
            }
            Err(error) => {
                debug!(backend = backend.as_str(), %error, "backend probe failed");
                false
            }
        }
    }

    pub async fn submit_tech_hub_application(
        &self,
        application: &TechHubApplication,
    ) -> Result<Value, ClientError> {
        self.submit(application).await
    }

    pub async fn schedule_ewaste_pickup(
        &self,
        pickup: &EWastePickupRequest,
    ) -> Result<Value, ClientError> {
        self.submit(pickup).await
    }

    pub async fn submit_contact_form(&self, message: &ContactMessage) -> Result<Value, ClientError> {
        self.submit(message).await
    }

    pub async fn process_donation(&self, donation: &DonationRecord) -> Result<Value, ClientError> {
        self.submit(donation).await
    }

    /// Validates locally, then posts to the transactional backend. Failures
    /// are always returned, whatever the listing policy says.
    pub async fn submit<S: Submission>(&self, submission: &S) -> Result<Value, ClientError> {
        if let Err(invalid) = submission.validate() {
            warn!(kind = S::KIND, error = %invalid, "submission rejected before sending");
            return Err(invalid.into());
        }

        let endpoint = self.config.endpoint(Backend::Transactional, S::ROUTE);
        let result = self.post_json(&endpoint, submission).await;
        match &result {
            Ok(_) => info!(kind = S::KIND, %endpoint, "submission accepted"),
            Err(error) => error!(
                kind = S::KIND,
                %endpoint,
                status = error.status(),
                %error,
                "submission failed"
            ),
        }
        result
    }

    async fn get_json(
        &self,
        endpoint: &str,
        query: Option<&[(&'static str, String)]>,
    ) -> Result<Value, ClientError> {
        let mut request = self.http.get(endpoint).header(ACCEPT, JSON_MEDIA_TYPE);
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        read_json(endpoint, response).await
    }

    async fn post_json<S: Submission>(
        &self,
        endpoint: &str,
        body: &S,
    ) -> Result<Value, ClientError> {
        let response = self
            .http
            .post(endpoint)
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;
        read_json(endpoint, response).await
    }

    fn resolve_listing<T>(
        &self,
        listing: &'static str,
        result: Result<Vec<T>, ClientError>,
        fallback: impl FnOnce() -> Vec<T>,
    ) -> Result<Vec<T>, ClientError> {
        let error = match result {
            Ok(items) => {
                debug!(listing, count = items.len(), "listing fetched");
                return Ok(items);
            }
            Err(error) => error,
        };

        match self.config.on_backend_unavailable {
            BackendUnavailablePolicy::FallbackToDemo => {
                warn!(listing, %error, "backend unavailable, serving fallback listing");
                Ok(fallback())
            }
            BackendUnavailablePolicy::Raise => {
                error!(listing, %error, "backend unavailable");
                Err(error)
            }
        }
    }
}

fn decode<T>(endpoint: &str, result: Result<T, serde_json::Error>) -> Result<T, ClientError> {
    result.map_err(|source| ClientError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

#[async_trait]
impl SiteApi for SiteClient {
    async fn fetch_projects(&self) -> Result<Vec<Project>, ClientError> {
        SiteClient::fetch_projects(self).await
    }

    async fn fetch_tech_stewards(&self) -> Result<Vec<TechSteward>, ClientError> {
        SiteClient::fetch_tech_stewards(self).await
    }

    async fn fetch_blog_posts(&self, query: &BlogQuery) -> Result<Vec<BlogPost>, ClientError> {
        SiteClient::fetch_blog_posts(self, query).await
    }

    async fn fetch_tech_hubs(&self) -> Result<Vec<TechHub>, ClientError> {
        SiteClient::fetch_tech_hubs(self).await
    }

    async fn probe(&self, backend: Backend) -> bool {
        SiteClient::probe(self, backend).await
    }

    async fn submit_tech_hub_application(
        &self,
        application: &TechHubApplication,
    ) -> Result<Value, ClientError> {
        SiteClient::submit_tech_hub_application(self, application).await
    }

    async fn schedule_ewaste_pickup(
        &self,
        pickup: &EWastePickupRequest,
    ) -> Result<Value, ClientError> {
        SiteClient::schedule_ewaste_pickup(self, pickup).await
    }

    async fn submit_contact_form(&self, message: &ContactMessage) -> Result<Value, ClientError> {
        SiteClient::submit_contact_form(self, message).await
    }

    async fn process_donation(&self, donation: &DonationRecord) -> Result<Value, ClientError> {
        SiteClient::process_donation(self, donation).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
