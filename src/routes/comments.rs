// ============================================================================
// Comment Routes
// ============================================================================
//
// Endpoints:
// - GET  /news/:id/comments - comments for an item, newest first
// - POST /news/:id/comments - submit a comment (validate -> moderate -> persist)
//
// ============================================================================

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::models::{Comment, NewComment};
use crate::pipeline::CommentPipeline;
use crate::routes::middleware::RequestId;

/// GET /news/:id/comments
pub async fn get_comments(
    State(ctx): State<Arc<AppContext>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<Comment>>> {
    if id <= 0 {
        return Err(AppError::validation("invalid news id"));
    }

    let comments = ctx.comments.for_news(id, &request_id.0).await?;
    Ok(Json(comments))
}

/// POST /news/:id/comments
///
/// Runs the moderate-then-persist pipeline and answers 201 with the accepted
/// comment; the comment is never persisted unless moderation approved it.
pub async fn add_comment(
    State(ctx): State<Arc<AppContext>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<i64>,
    Json(submission): Json<NewComment>,
) -> AppResult<impl IntoResponse> {
    if id <= 0 {
        return Err(AppError::validation("invalid news id"));
    }

    let pipeline = CommentPipeline::new(&ctx);
    let accepted = pipeline.submit(id, submission, &request_id.0).await?;

    Ok((StatusCode::CREATED, Json(accepted)))
}
