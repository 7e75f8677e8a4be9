use super::api_types::WatchProvidersResponse;
use crate::catalog::{
    CatalogError, Locale, Result,
    provider::{CatalogProvider, HttpClient, UpstreamAuth, id_segment},
    types::{DetailRecord, ExternalIds, MediaKind, RegionProviders, SeasonDetail},
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Adapter for The Movie Database v3 API, authenticated with a bearer token
pub struct TmdbClient {
    client: HttpClient,
    api_key: Option<String>,
}

impl TmdbClient {
    /// Build the client. A missing key is accepted here and reported on every call.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(base_url, timeout)?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn credential(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            CatalogError::Configuration("TMDB API key is not configured".to_string())
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let token = self.credential()?;
        self.client
            .get_with_params(endpoint, params, UpstreamAuth::Bearer(token))
            .await
    }
}

#[async_trait]
impl CatalogProvider for TmdbClient {
    fn id(&self) -> &'static str {
        "tmdb"
    }

    async fn details(&self, kind: MediaKind, id: &str, locale: &Locale) -> Result<DetailRecord> {
        self.credential()?;
        let id = id_segment(id)?;
        debug!("Fetching {kind} details for ID: {id}, language: {locale}");

        let endpoint = format!("/{kind}/{id}");
        self.request(&endpoint, &[("language", locale.code())])
            .await
    }

    async fn watch_providers(&self, kind: MediaKind, id: &str) -> Result<RegionProviders> {
        self.credential()?;
        let id = id_segment(id)?;

        let endpoint = format!("/{kind}/{id}/watch/providers");
        let response: WatchProvidersResponse = self.request(&endpoint, &[]).await?;
        Ok(response.into_region_map())
    }

    async fn external_ids(&self, kind: MediaKind, id: &str) -> Result<ExternalIds> {
        self.credential()?;
        let id = id_segment(id)?;

        let endpoint = format!("/{kind}/{id}/external_ids");
        self.request(&endpoint, &[]).await
    }

    async fn season(&self, tv_id: &str, season: u32, locale: &Locale) -> Result<SeasonDetail> {
        self.credential()?;
        let tv_id = id_segment(tv_id)?;
        debug!("Fetching season {season} of TV series {tv_id}, language: {locale}");

        let endpoint = format!("/tv/{tv_id}/season/{season}");
        self.request(&endpoint, &[("language", locale.code())])
            .await
    }

    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        locale: &Locale,
    ) -> Result<serde_json::Value> {
        self.credential()?;
        let endpoint = format!("/search/{kind}");
        self.request(
            &endpoint,
            &[
                ("query", query),
                ("include_adult", "false"),
                ("language", locale.code()),
                ("page", "1"),
            ],
        )
        .await
    }
}
