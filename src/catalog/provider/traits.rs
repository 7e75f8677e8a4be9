use crate::catalog::{
    Locale, Result,
    types::{DetailRecord, ExternalIds, LinkMap, MediaKind, RegionProviders, SeasonDetail},
};
use async_trait::async_trait;

/// Primary metadata catalog
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Provider identifier (e.g., "tmdb")
    fn id(&self) -> &'static str;

    /// Fetch the primary record of a movie or show
    async fn details(&self, kind: MediaKind, id: &str, locale: &Locale) -> Result<DetailRecord>;

    /// Watch-provider availability for every region the catalog knows about
    async fn watch_providers(&self, kind: MediaKind, id: &str) -> Result<RegionProviders>;

    /// Identifiers of the entity in other catalogs
    async fn external_ids(&self, kind: MediaKind, id: &str) -> Result<ExternalIds>;

    /// Episodes of one season of a show
    async fn season(&self, tv_id: &str, season: u32, locale: &Locale) -> Result<SeasonDetail>;

    /// First page of search results, returned as the upstream envelope
    async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        locale: &Locale,
    ) -> Result<serde_json::Value>;
}

/// Secondary ratings site resolving a cross-catalog id into outbound links
#[async_trait]
pub trait RatingsProvider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> &'static str;

    /// Provider-name to URL mapping for the given cross-catalog id
    async fn links(&self, cross_catalog_id: &str) -> Result<LinkMap>;
}
