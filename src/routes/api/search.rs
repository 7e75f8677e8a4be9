use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{AppError, AppResult, Ctx, catalog::MediaKind};

/// Search request parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text query
    pub q: Option<String>,
    /// Entity kind: movie or tv (default: movie)
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Locale code in `xx-YY` form
    pub lang: Option<String>,
}

impl SearchQuery {
    /// Validate parameters; the query is checked before the kind
    pub fn validate(&self) -> AppResult<(&str, MediaKind)> {
        let query = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::InvalidArgument("Query parameter is required".to_string()))?;

        let kind = match self.kind.as_deref() {
            None => MediaKind::Movie,
            Some(raw) => raw.parse().map_err(AppError::InvalidArgument)?,
        };

        Ok((query, kind))
    }
}

/// Search the catalog and pass the upstream result page through
/// GET /api/search?q=...&type=movie|tv&lang=...
async fn search(
    State(ctx): State<Ctx>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let (query, kind) = params.validate()?;
    let locale = ctx.locale(params.lang.as_deref());

    tracing::debug!("Searching {kind} for '{query}' ({locale})");
    let page = ctx.catalog.search(query, kind, &locale).await?;
    Ok(Json(page))
}

/// Mount search routes
pub fn mount() -> Router<Ctx> {
    Router::new().route("/search", get(search))
}
