use axum::Router;

use crate::Ctx;

pub mod details;
pub mod health;
pub mod search;

/// Mount all API routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .merge(health::mount())
        .merge(details::mount())
        .merge(search::mount())
}
