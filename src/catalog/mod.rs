mod locale;
mod provider;
mod types;


pub use locale::{Language, Locale, LocaleDefaults, region_of};
pub use provider::{
    CatalogProvider, HttpClient, RatingsClient, RatingsProvider, TMDB_BASE_URL, TMDB_IMAGE_BASE,
    TmdbClient, UpstreamAuth,
};
pub use types::{
    DetailRecord, Episode, ExternalIds, ExternalLink, Genre, LinkMap, MediaItem, MediaKind,
    ProviderEntry, ProviderMap, RegionProviders, SearchPage, SeasonDetail, SeasonSummary,
};

use std::time::Duration;

/// Catalog result type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Outcomes of a call against the upstream catalog or ratings API
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after: {0:?}")]
    RateLimited(Option<Duration>),

    #[error("Upstream error: {status} - {message}")]
    Upstream { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}
