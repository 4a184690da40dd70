// ============================================================================
// News Routes
// ============================================================================
//
// Endpoints:
// - GET /news        - paginated, search-filtered list (one upstream call)
// - GET /news/:id    - composite view {news, comments} via the aggregator
// - GET /news/filter - in-memory title/category filter, no upstream call
//
// ============================================================================

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::aggregate;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::models::{NewsDetail, NewsPage, NewsShort};
use crate::routes::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub s: Option<String>,
}

/// GET /news
pub async fn list_news(
    State(ctx): State<Arc<AppContext>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<NewsPage>> {
    let page = match query.page {
        Some(0) => return Err(AppError::validation("page must be >= 1")),
        Some(page) => page,
        None => 1,
    };

    let news = ctx
        .news
        .list(page, query.s.as_deref(), &request_id.0)
        .await?;
    Ok(Json(news))
}

/// GET /news/:id
///
/// Fans out to the news and comment stores concurrently; the response is the
/// composite view, or a single error when either slot fails.
pub async fn get_news(
    State(ctx): State<Arc<AppContext>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> AppResult<Json<NewsDetail>> {
    if id <= 0 {
        return Err(AppError::validation("invalid news id"));
    }

    let detail = aggregate::news_with_comments(&ctx, id, &request_id.0).await?;
    Ok(Json(detail))
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub title: Option<String>,
    pub category: Option<String>,
}

/// GET /news/filter
///
/// Substring filter over the in-memory catalog; both parameters match
/// against the title, as the catalog carries no separate category field.
pub async fn filter_news(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<FilterQuery>,
) -> Json<Vec<NewsShort>> {
    let matches = ctx
        .catalog
        .iter()
        .filter(|item| {
            query
                .title
                .as_deref()
                .map_or(true, |t| item.title.contains(t))
                && query
                    .category
                    .as_deref()
                    .map_or(true, |c| item.title.contains(c))
        })
        .cloned()
        .collect();

    Json(matches)
}
