// ============================================================================
// Fan-Out Aggregator
// ============================================================================
//
// Joins N independent upstream reads into one composite response. One
// spawned worker per named slot, all sharing the inbound request's
// correlation id. Every worker runs to completion before any slot is
// inspected, so worst-case latency is the slowest upstream, bounded by the
// client timeout. The composite is emitted if and only if every slot
// succeeded; a partial payload is never returned.
//
// When more than one slot fails, slots are inspected in lexicographic
// slot-name order ("comments" before "news"), so the surfaced error is
// deterministic regardless of completion order.
//
// ============================================================================

use tokio::task::JoinError;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::models::NewsDetail;
use crate::upstream::UpstreamError;

/// Fetch one news item and its comments concurrently and merge them into
/// the composite view.
pub async fn news_with_comments(
    ctx: &AppContext,
    news_id: i64,
    request_id: &str,
) -> AppResult<NewsDetail> {
    let news_store = ctx.news.clone();
    let comment_store = ctx.comments.clone();
    let news_rid = request_id.to_string();
    let comments_rid = request_id.to_string();

    let news_worker = tokio::spawn(async move { news_store.get(news_id, &news_rid).await });
    let comments_worker =
        tokio::spawn(async move { comment_store.for_news(news_id, &comments_rid).await });

    // Synchronization barrier: both workers finish before any slot is
    // inspected. A failed slot does not cancel its sibling.
    let news_slot = news_worker.await;
    let comments_slot = comments_worker.await;

    let comments = resolve_slot("comments", comments_slot)?;
    let news = resolve_slot("news", news_slot)?;

    Ok(NewsDetail { news, comments })
}

/// Unwrap one named slot: worker panic, then upstream failure, then payload.
fn resolve_slot<T>(
    slot: &'static str,
    joined: Result<Result<T, UpstreamError>, JoinError>,
) -> AppResult<T> {
    match joined {
        Ok(Ok(payload)) => Ok(payload),
        Ok(Err(e)) => {
            tracing::warn!(slot, error = %e, "Aggregation slot failed");
            Err(AppError::Upstream(e))
        }
        Err(e) => {
            tracing::error!(slot, error = %e, "Aggregation worker panicked");
            Err(AppError::internal(format!("{} worker failed", slot)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn resolve_slot_passes_payload_through() {
        let joined = tokio::spawn(async { Ok::<_, UpstreamError>(7) }).await;
        assert_eq!(resolve_slot("news", joined).unwrap(), 7);
    }

    #[tokio::test]
    async fn resolve_slot_surfaces_upstream_failure() {
        let joined = tokio::spawn(async {
            Err::<i64, _>(UpstreamError::Status {
                service: "news",
                status: StatusCode::INTERNAL_SERVER_ERROR,
            })
        })
        .await;
        let err = resolve_slot("news", joined).unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn resolve_slot_reports_worker_panic_as_internal() {
        let joined: Result<Result<i64, UpstreamError>, tokio::task::JoinError> =
            tokio::spawn(async { panic!("boom") }).await;
        let err = resolve_slot("comments", joined).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
