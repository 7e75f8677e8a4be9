use super::api_types::LinksResponse;
use crate::catalog::{
    Result,
    provider::{HttpClient, RatingsProvider, UpstreamAuth, id_segment},
    types::LinkMap,
};
use async_trait::async_trait;
use std::time::Duration;

const API_KEY_HEADER: &str = "x-api-key";

/// Adapter for the secondary ratings API, keyed by cross-catalog id
pub struct RatingsClient {
    client: HttpClient,
    api_key: String,
}

impl RatingsClient {
    /// Returns `None` when the key or base URL is missing, which disables link enrichment
    pub fn from_settings(
        base_url: Option<&str>,
        api_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Option<Self>> {
        let (Some(base_url), Some(api_key)) = (
            base_url.filter(|u| !u.trim().is_empty()),
            api_key.filter(|k| !k.trim().is_empty()),
        ) else {
            return Ok(None);
        };

        Ok(Some(Self {
            client: HttpClient::new(base_url, timeout)?,
            api_key: api_key.to_string(),
        }))
    }
}

#[async_trait]
impl RatingsProvider for RatingsClient {
    fn id(&self) -> &'static str {
        "ratings"
    }

    async fn links(&self, cross_catalog_id: &str) -> Result<LinkMap> {
        let id = id_segment(cross_catalog_id)?;
        let endpoint = format!("/links/{id}");
        let response: LinksResponse = self
            .client
            .get_with_params(
                &endpoint,
                &[],
                UpstreamAuth::ApiKey {
                    header: API_KEY_HEADER,
                    key: &self.api_key,
                },
            )
            .await?;

        Ok(response.links)
    }
}
