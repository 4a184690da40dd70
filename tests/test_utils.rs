use std::sync::Arc;

use news_gateway::config::Config;
use news_gateway::context::AppContext;
use news_gateway::models::NewsShort;
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
}

/// Collaborator base URLs for one test run; each test points these at its
/// own httpmock servers.
pub struct Upstreams {
    pub news_url: String,
    pub comments_url: String,
    pub censor_url: String,
}

pub async fn spawn_app(upstreams: Upstreams) -> TestApp {
    spawn_app_with_catalog(upstreams, Vec::new()).await
}

pub async fn spawn_app_with_catalog(upstreams: Upstreams, catalog: Vec<NewsShort>) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());

    let config = Arc::new(Config {
        port: 0,
        news_service_url: upstreams.news_url,
        comments_service_url: upstreams.comments_url,
        censor_service_url: upstreams.censor_url,
        upstream_timeout_secs: 5,
        rust_log: "info".to_string(),
    });

    let ctx = AppContext::with_catalog(config, catalog).expect("Failed to build app context");

    tokio::spawn(news_gateway::run_server(ctx, listener));

    TestApp { address }
}
