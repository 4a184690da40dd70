// ============================================================================
// Comment Submission Pipeline
// ============================================================================
//
// Sequential, failure-short-circuiting pipeline for the one mutating
// operation the gateway exposes. Stages, in fixed order:
//
// 1. Validate - author and text non-empty; fails fast, no network calls
// 2. Moderate - explicit approval required before anything is persisted
// 3. Persist  - invoked at most once, only after approval
//
// The accepted comment mirrors the input with gateway-assigned news_id and
// created_at; it is not re-read from storage.
//
// ============================================================================

use chrono::Utc;
use std::sync::Arc;

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::models::{Comment, NewComment};
use crate::upstream::{CommentStore, Moderator, Verdict};

/// One pipeline instance per inbound submission; holds only shared handles,
/// so construction is two `Arc` clones.
pub struct CommentPipeline {
    moderator: Arc<dyn Moderator>,
    comments: Arc<dyn CommentStore>,
}

impl CommentPipeline {
    pub fn new(ctx: &AppContext) -> Self {
        Self {
            moderator: ctx.moderator.clone(),
            comments: ctx.comments.clone(),
        }
    }

    /// Run the full pipeline for one submission.
    pub async fn submit(
        &self,
        news_id: i64,
        submission: NewComment,
        request_id: &str,
    ) -> AppResult<Comment> {
        // Stage 1: validate. No network traffic before this passes.
        if submission.author.trim().is_empty() {
            return Err(AppError::validation("author is required"));
        }
        if submission.text.trim().is_empty() {
            return Err(AppError::validation("text is required"));
        }

        // news_id and created_at are gateway-assigned, never client input.
        let comment = Comment {
            id: 0,
            news_id,
            author: submission.author,
            text: submission.text,
            parent_id: submission.parent_id,
            created_at: Utc::now(),
        };

        // Stage 2: moderate. Only an explicit approval reaches persistence;
        // rejection, transport failure and unexpected statuses all abort.
        match self.moderator.review(&comment, request_id).await {
            Ok(Verdict::Approved) => {}
            Ok(Verdict::Rejected) => {
                tracing::info!(
                    news_id,
                    request_id,
                    "Comment rejected by moderation"
                );
                return Err(AppError::moderation_rejected(
                    "comment contains forbidden content",
                ));
            }
            Err(e) => return Err(AppError::Upstream(e)),
        }

        // Stage 3: persist, at most once.
        self.comments.create(&comment, request_id).await?;

        tracing::debug!(news_id, request_id, "Comment accepted and persisted");
        Ok(comment)
    }
}
