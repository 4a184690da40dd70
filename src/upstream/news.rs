use async_trait::async_trait;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::models::{NewsFull, NewsPage};
use crate::upstream::client::{UpstreamClient, UpstreamError, UpstreamRequest};

/// Read access to the news store.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// One page of news, optionally filtered by a title substring.
    async fn list(
        &self,
        page: u32,
        search: Option<&str>,
        request_id: &str,
    ) -> Result<NewsPage, UpstreamError>;

    /// A single item with its body.
    async fn get(&self, id: i64, request_id: &str) -> Result<NewsFull, UpstreamError>;
}

/// News store reached over HTTP.
pub struct HttpNewsStore {
    client: Arc<UpstreamClient>,
    base_url: String,
}

impl HttpNewsStore {
    pub fn new(client: Arc<UpstreamClient>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl NewsStore for HttpNewsStore {
    async fn list(
        &self,
        page: u32,
        search: Option<&str>,
        request_id: &str,
    ) -> Result<NewsPage, UpstreamError> {
        let mut request = UpstreamRequest::new("news", &self.base_url, "/news", request_id)
            .query("page", page.to_string());
        if let Some(s) = search {
            request = request.query("s", s);
        }

        self.client.get_json(request, StatusCode::OK).await
    }

    async fn get(&self, id: i64, request_id: &str) -> Result<NewsFull, UpstreamError> {
        let request =
            UpstreamRequest::new("news", &self.base_url, &format!("/news/{}", id), request_id);

        self.client.get_json(request, StatusCode::OK).await
    }
}
