pub mod http;
pub mod ratings;
pub mod tmdb;
pub mod traits;

pub use http::{HttpClient, UpstreamAuth};
pub use ratings::RatingsClient;
pub use tmdb::{TMDB_BASE_URL, TMDB_IMAGE_BASE, TmdbClient};
pub use traits::{CatalogProvider, RatingsProvider};

use std::borrow::Cow;

use crate::catalog::{CatalogError, Result};

/// Reject blank entity ids and dot segments before anything goes over the wire
pub(crate) fn require_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CatalogError::InvalidArgument(
            "Entity ID is required".to_string(),
        ));
    }
    if id == "." || id == ".." {
        return Err(CatalogError::InvalidArgument(format!(
            "Invalid entity ID: '{id}'"
        )));
    }
    Ok(id)
}

/// Validated id encoded as a single path segment
pub(crate) fn id_segment(id: &str) -> Result<Cow<'_, str>> {
    require_id(id).map(urlencoding::encode)
}
