use crate::catalog::{CatalogError, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, warn};

const USER_AGENT: &str = concat!("goodkraken/", env!("CARGO_PKG_VERSION"));

/// Credential attached to an outbound request
#[derive(Debug, Clone, Copy)]
pub enum UpstreamAuth<'a> {
    /// `Authorization: Bearer <token>`
    Bearer(&'a str),
    /// Raw key sent in a named header
    ApiKey {
        header: &'static str,
        key: &'a str,
    },
}

impl UpstreamAuth<'_> {
    fn apply(self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Bearer(token) => request.bearer_auth(token),
            Self::ApiKey { header, key } => request.header(header, key),
        }
    }
}

/// HTTP client wrapper shared by the upstream adapters
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build full URL from endpoint
    #[must_use]
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Execute an authenticated GET with query parameters and parse the JSON body
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        auth: UpstreamAuth<'_>,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!("GET {url}");

        let request = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(params);

        let response = auth.apply(request).send().await.map_err(|e| {
            error!("Transport failure for {endpoint}: {e}");
            CatalogError::Transport(e)
        })?;

        Self::handle_response(endpoint, response).await
    }

    /// Map the status to a domain outcome and parse JSON on success
    async fn handle_response<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after = response
                        .headers()
                        .get(header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.trim().parse::<u64>().ok())
                        .map(Duration::from_secs);
                    warn!("Upstream rate limit exceeded for {endpoint}");
                    CatalogError::RateLimited(retry_after)
                }
                StatusCode::NOT_FOUND => CatalogError::NotFound(endpoint.to_string()),
                _ => {
                    let message = response.text().await.unwrap_or_default();
                    error!("Upstream error for {endpoint}: {status}");
                    CatalogError::Upstream {
                        status: status.as_u16(),
                        message,
                    }
                }
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(format!("JSON parse error: {e}")))
    }
}
