// ============================================================================
// Axum Routes Module
// ============================================================================
//
// Structure:
// - mod.rs: router assembly and middleware layering
// - news.rs: news list, composite detail view, in-memory filter
// - comments.rs: comment list and submission
// - middleware.rs: correlation id assignment and request logging
//
// ============================================================================

mod comments;
pub mod middleware;
mod news;

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;

/// Create the main application router with all routes
pub fn create_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/news", get(news::list_news))
        .route("/news/filter", get(news::filter_news))
        .route("/news/:id", get(news::get_news))
        .route(
            "/news/:id/comments",
            get(comments::get_comments).post(comments::add_comment),
        )
        // Apply middleware (order matters - last added runs first)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(
                    crate::routes::middleware::correlation,
                ))
                .into_inner(),
        )
        .with_state(ctx)
}
