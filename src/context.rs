use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::models::NewsShort;
use crate::upstream::{
    HttpCommentStore, HttpModerator, HttpNewsStore, UpstreamClient,
};
use crate::upstream::{CommentStore, Moderator, NewsStore};

/// Application context containing shared dependencies.
/// One instance per process; handlers and pipelines borrow from it instead
/// of carrying individual collaborator handles around.
pub struct AppContext {
    pub config: Arc<Config>,
    pub news: Arc<dyn NewsStore>,
    pub comments: Arc<dyn CommentStore>,
    pub moderator: Arc<dyn Moderator>,
    /// In-memory catalog served by /news/filter without any upstream call.
    pub catalog: Vec<NewsShort>,
}

impl AppContext {
    /// Build the context with HTTP collaborators and an empty filter catalog.
    pub fn new(config: Arc<Config>) -> Result<Arc<Self>> {
        Self::with_catalog(config, Vec::new())
    }

    /// Build the context with a seeded filter catalog. Tests and future
    /// warm-up paths inject the catalog here; nothing mutates it afterwards.
    pub fn with_catalog(config: Arc<Config>, catalog: Vec<NewsShort>) -> Result<Arc<Self>> {
        let client = Arc::new(UpstreamClient::new(config.upstream_timeout_secs)?);

        let news = Arc::new(HttpNewsStore::new(
            client.clone(),
            config.news_service_url.clone(),
        ));
        let comments = Arc::new(HttpCommentStore::new(
            client.clone(),
            config.comments_service_url.clone(),
        ));
        let moderator = Arc::new(HttpModerator::new(
            client,
            config.censor_service_url.clone(),
        ));

        Ok(Arc::new(Self {
            config,
            news,
            comments,
            moderator,
            catalog,
        }))
    }
}
