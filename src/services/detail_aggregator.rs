use crate::catalog::{
    CatalogProvider, DetailRecord, ExternalLink, LinkMap, Locale, MediaKind, ProviderMap,
    RatingsProvider, Result,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turn a ratings link mapping into `{provider, url}` pairs, keeping the mapping's order.
///
/// Entries whose value is not a string are dropped.
#[must_use]
pub fn links_to_pairs(links: LinkMap) -> Vec<ExternalLink> {
    links
        .into_iter()
        .filter_map(|(provider, url)| match url {
            serde_json::Value::String(url) => Some(ExternalLink { provider, url }),
            _ => None,
        })
        .collect()
}

/// Builds one enriched detail record per request out of several upstream calls
pub struct DetailAggregator {
    catalog: Arc<dyn CatalogProvider>,
    ratings: Option<Arc<dyn RatingsProvider>>,
}

impl DetailAggregator {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        ratings: Option<Arc<dyn RatingsProvider>>,
    ) -> Self {
        Self { catalog, ratings }
    }

    /// Whether external links can be resolved at all
    #[must_use]
    pub fn links_enabled(&self) -> bool {
        self.ratings.is_some()
    }

    /// Fetch the primary record and attach providers and external links.
    ///
    /// Only the primary fetch can fail the request; enrichment failures
    /// degrade to empty values.
    pub async fn aggregate(&self, kind: MediaKind, id: &str, locale: &Locale) -> Result<DetailRecord> {
        let mut record = self.catalog.details(kind, id, locale).await?;
        info!(
            "Fetched {kind} details for ID: {id} ({})",
            record.display_title()
        );

        let (providers, external_links) = tokio::join!(
            self.providers_for(kind, id, locale.region()),
            self.external_links_for(kind, id),
        );

        record.enrich(providers, external_links);
        Ok(record)
    }

    async fn providers_for(&self, kind: MediaKind, id: &str, region: &str) -> ProviderMap {
        match self.catalog.watch_providers(kind, id).await {
            Ok(mut regions) => regions.remove(region).unwrap_or_else(|| {
                debug!("No watch providers for {kind} {id} in region {region}");
                ProviderMap::new()
            }),
            Err(e) => {
                warn!("Watch providers lookup failed for {kind} {id}: {e}");
                ProviderMap::new()
            }
        }
    }

    async fn external_links_for(&self, kind: MediaKind, id: &str) -> Vec<ExternalLink> {
        let Some(ratings) = &self.ratings else {
            debug!("Ratings API not configured, skipping external links for {kind} {id}");
            return Vec::new();
        };

        let ids = match self.catalog.external_ids(kind, id).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!("External IDs lookup failed for {kind} {id}: {e}");
                return Vec::new();
            }
        };

        let Some(cross_id) = ids.cross_catalog_id() else {
            debug!("No cross-catalog ID for {kind} {id}");
            return Vec::new();
        };

        match ratings.links(cross_id).await {
            Ok(links) => links_to_pairs(links),
            Err(e) => {
                warn!(
                    "{} links lookup failed for {kind} {id} ({cross_id}): {e}",
                    ratings.id()
                );
                Vec::new()
            }
        }
    }
}
