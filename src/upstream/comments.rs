use async_trait::async_trait;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::models::Comment;
use crate::upstream::client::{UpstreamClient, UpstreamError, UpstreamRequest};

/// Access to the comment store.
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Comments for one news item, newest first (ordering is the store's).
    async fn for_news(&self, news_id: i64, request_id: &str)
        -> Result<Vec<Comment>, UpstreamError>;

    /// Persist an accepted comment. The store answers 201 on success; any
    /// other outcome is a fault.
    async fn create(&self, comment: &Comment, request_id: &str) -> Result<(), UpstreamError>;
}

/// Comment store reached over HTTP.
pub struct HttpCommentStore {
    client: Arc<UpstreamClient>,
    base_url: String,
}

impl HttpCommentStore {
    pub fn new(client: Arc<UpstreamClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CommentStore for HttpCommentStore {
    async fn for_news(
        &self,
        news_id: i64,
        request_id: &str,
    ) -> Result<Vec<Comment>, UpstreamError> {
        let request = UpstreamRequest::new(
            "comments",
            &self.base_url,
            &format!("/comments/{}", news_id),
            request_id,
        );

        self.client.get_json(request, StatusCode::OK).await
    }

    async fn create(&self, comment: &Comment, request_id: &str) -> Result<(), UpstreamError> {
        let request = UpstreamRequest::new(
            "comments",
            &self.base_url,
            &format!("/comments/{}", comment.news_id),
            request_id,
        );

        self.client
            .post_expect(request, comment, StatusCode::CREATED)
            .await
    }
}
