pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use routes::create_router;

use std::sync::Arc;

use catalog::{CatalogProvider, Locale, RatingsClient, RatingsProvider, TmdbClient};
use services::DetailAggregator;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct Ctx {
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn CatalogProvider>,
    pub aggregator: Arc<DetailAggregator>,
}

impl Ctx {
    /// Wire the upstream adapters described by the configuration
    pub fn from_config(config: AppConfig) -> catalog::Result<Self> {
        let catalog: Arc<dyn CatalogProvider> = Arc::new(TmdbClient::new(
            config.catalog.base_url.clone(),
            config.catalog.api_key.clone(),
            config.catalog.timeout(),
        )?);

        let ratings = RatingsClient::from_settings(
            config.ratings.base_url.as_deref(),
            config.ratings.api_key.as_deref(),
            config.ratings.timeout(),
        )?
        .map(|client| Arc::new(client) as Arc<dyn RatingsProvider>);

        if config.catalog.api_key.is_none() {
            tracing::warn!("TMDB_API_KEY is not configured; detail and search calls will fail");
        }
        if ratings.is_none() {
            tracing::info!("Ratings API not configured; external links are disabled");
        }

        Ok(Self::new(config, catalog, ratings))
    }

    #[must_use]
    pub fn new(
        config: AppConfig,
        catalog: Arc<dyn CatalogProvider>,
        ratings: Option<Arc<dyn RatingsProvider>>,
    ) -> Self {
        let aggregator = Arc::new(DetailAggregator::new(Arc::clone(&catalog), ratings));
        Self {
            config: Arc::new(config),
            catalog,
            aggregator,
        }
    }

    /// Resolve the optional `lang` query parameter against the configured defaults
    #[must_use]
    pub fn locale(&self, raw: Option<&str>) -> Locale {
        Locale::resolve(raw, &self.config.locale)
    }
}
