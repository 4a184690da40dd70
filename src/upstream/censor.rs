use async_trait::async_trait;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::models::Comment;
use crate::upstream::client::{UpstreamClient, UpstreamError, UpstreamRequest};

/// Moderation verdict for a candidate comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Rejected,
}

/// Content moderation gate. A verdict is only returned when the service
/// actually judged the content; service faults surface as errors so the
/// pipeline can abort instead of persisting unreviewed content.
#[async_trait]
pub trait Moderator: Send + Sync {
    async fn review(&self, comment: &Comment, request_id: &str)
        -> Result<Verdict, UpstreamError>;
}

/// Moderation service reached over HTTP. 200 approves, 400 rejects,
/// anything else is a moderation-service fault.
pub struct HttpModerator {
    client: Arc<UpstreamClient>,
    base_url: String,
}

impl HttpModerator {
    pub fn new(client: Arc<UpstreamClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Moderator for HttpModerator {
    async fn review(
        &self,
        comment: &Comment,
        request_id: &str,
    ) -> Result<Verdict, UpstreamError> {
        let request = UpstreamRequest::new("censor", &self.base_url, "/censor", request_id);

        let status = self.client.post_status(request, comment).await?;
        match status {
            StatusCode::OK => Ok(Verdict::Approved),
            StatusCode::BAD_REQUEST => Ok(Verdict::Rejected),
            status => Err(UpstreamError::Status {
                service: "censor",
                status,
            }),
        }
    }
}
