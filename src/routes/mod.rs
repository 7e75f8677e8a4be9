use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::Ctx;

pub mod api;

/// Build the application router with all API routes under `/api`
pub fn create_router(ctx: Ctx) -> Router {
    Router::new()
        .nest("/api", api::mount())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(ctx)
}
