use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use serde::Deserialize;

use crate::{
    AppError, AppResult, Ctx,
    catalog::{DetailRecord, MediaKind, SeasonDetail},
};

/// Query parameters shared by the detail endpoints
#[derive(Debug, Deserialize)]
pub struct LangQuery {
    /// Locale code in `xx-YY` form
    pub lang: Option<String>,
}

/// Season request parameters
#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    /// Season number
    pub season: Option<String>,
    pub lang: Option<String>,
}

// ============ Handlers ============

/// GET /api/movie/{id}?lang=...
async fn get_movie(
    State(ctx): State<Ctx>,
    Path(id): Path<String>,
    Query(params): Query<LangQuery>,
) -> AppResult<Json<DetailRecord>> {
    detail(&ctx, MediaKind::Movie, &id, params.lang.as_deref()).await
}

/// GET /api/tv/{id}?lang=...
async fn get_tv(
    State(ctx): State<Ctx>,
    Path(id): Path<String>,
    Query(params): Query<LangQuery>,
) -> AppResult<Json<DetailRecord>> {
    detail(&ctx, MediaKind::Tv, &id, params.lang.as_deref()).await
}

/// GET /api/tv/{id}/seasons?season=...&lang=...
async fn get_season(
    State(ctx): State<Ctx>,
    Path(id): Path<String>,
    Query(params): Query<SeasonQuery>,
) -> AppResult<Json<SeasonDetail>> {
    let season = params
        .season
        .as_deref()
        .map(str::trim)
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| {
            AppError::InvalidArgument("Season parameter must be a non-negative number".to_string())
        })?;

    let locale = ctx.locale(params.lang.as_deref());
    let detail = ctx.catalog.season(&id, season, &locale).await?;
    Ok(Json(detail))
}

// ============ Helpers ============

async fn detail(
    ctx: &Ctx,
    kind: MediaKind,
    id: &str,
    lang: Option<&str>,
) -> AppResult<Json<DetailRecord>> {
    let locale = ctx.locale(lang);
    let record = ctx.aggregator.aggregate(kind, id, &locale).await?;
    Ok(Json(record))
}

/// Mount detail routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/movie/{id}", get(get_movie))
        .route("/tv/{id}", get(get_tv))
        .route("/tv/{id}/seasons", get(get_season))
}
