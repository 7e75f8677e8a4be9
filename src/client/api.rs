use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{
    SearchRequest,
    messages::{MessageKey, message},
};
use crate::catalog::{Language, SearchPage};

/// Errors seen by the client side of a search
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request cancelled")]
    Cancelled,

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("search failed with status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("search controller has stopped")]
    ControllerClosed,
}

impl ClientError {
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Localized message to display; cancellations are never shown
    #[must_use]
    pub const fn user_message(&self, language: Language) -> Option<&'static str> {
        match self {
            Self::Cancelled => None,
            Self::RateLimited => Some(message(language, MessageKey::RateLimited)),
            _ => Some(message(language, MessageKey::SearchFailed)),
        }
    }
}

/// Performs one search call; implementations should stop early once `cancel` fires
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchPage, ClientError>;
}

/// Calls the `/api/search` endpoint of a running server
pub struct HttpSearchApi {
    client: Client,
    base_url: String,
}

impl HttpSearchApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("goodkraken-search/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn url(&self, request: &SearchRequest) -> String {
        format!("{}/api/search?{}", self.base_url, request.to_query_string())
    }

    async fn fetch(&self, request: &SearchRequest) -> Result<SearchPage, ClientError> {
        let url = self.url(request);
        debug!("GET {url}");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => Err(ClientError::RateLimited),
            status if !status.is_success() => Err(ClientError::Status(status.as_u16())),
            _ => response
                .json::<SearchPage>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string())),
        }
    }
}

#[async_trait]
impl SearchApi for HttpSearchApi {
    async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchPage, ClientError> {
        tokio::select! {
            () = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.fetch(request) => result,
        }
    }
}
