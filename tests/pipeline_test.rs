// ============================================================================
// Comment Pipeline Tests
// ============================================================================
//
// Moderate-then-persist guarantees, observed end to end:
// - persistence is invoked exactly once for approved submissions, with
//   author/text/parent_id unchanged
// - rejected or invalid submissions never reach the comment store
// - moderation faults abort as internal errors, not rejections
//
// ============================================================================

use httpmock::prelude::*;
use serde_json::json;

mod test_utils;
use test_utils::{spawn_app, Upstreams};

fn upstreams(comments: &MockServer, censor: &MockServer) -> Upstreams {
    Upstreams {
        news_url: "http://127.0.0.1:9".to_string(),
        comments_url: comments.base_url(),
        censor_url: censor.base_url(),
    }
}

#[tokio::test]
async fn approved_comment_is_persisted_once_with_fields_unchanged() {
    let comments = MockServer::start();
    let censor = MockServer::start();

    let censor_mock = censor.mock(|when, then| {
        when.method(POST).path("/censor");
        then.status(200).body("Comment approved");
    });
    let create_mock = comments.mock(|when, then| {
        when.method(POST)
            .path("/comments/5")
            .json_body_partial(
                r#"{"news_id": 5, "author": "u1", "text": "nice article", "parent_id": 2}"#,
            );
        then.status(201).json_body(json!({"status": "success"}));
    });

    let app = spawn_app(upstreams(&comments, &censor)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/news/5/comments", app.address))
        .json(&json!({"author": "u1", "text": "nice article", "parent_id": 2}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["news_id"], 5);
    assert_eq!(body["author"], "u1");
    assert_eq!(body["text"], "nice article");
    assert_eq!(body["parent_id"], 2);

    censor_mock.assert();
    create_mock.assert();
}

#[tokio::test]
async fn rejected_comment_is_never_persisted() {
    let comments = MockServer::start();
    let censor = MockServer::start();

    let censor_mock = censor.mock(|when, then| {
        when.method(POST).path("/censor");
        then.status(400).body("Comment contains forbidden words");
    });
    let create_mock = comments.mock(|when, then| {
        when.method(POST).path("/comments/5");
        then.status(201);
    });

    let app = spawn_app(upstreams(&comments, &censor)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/news/5/comments", app.address))
        .json(&json!({"author": "u1", "text": "contains qwerty"}))
        .send()
        .await
        .unwrap();

    // A rejection is a client error with its own code, not an internal error
    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error_code"], "MODERATION_REJECTED");

    censor_mock.assert();
    assert_eq!(create_mock.hits(), 0);
}

#[tokio::test]
async fn moderation_fault_is_an_upstream_error_and_blocks_persistence() {
    let comments = MockServer::start();
    let censor = MockServer::start();

    censor.mock(|when, then| {
        when.method(POST).path("/censor");
        then.status(500).body("censor down");
    });
    let create_mock = comments.mock(|when, then| {
        when.method(POST).path("/comments/5");
        then.status(201);
    });

    let app = spawn_app(upstreams(&comments, &censor)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/news/5/comments", app.address))
        .json(&json!({"author": "u1", "text": "anything"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error_code"], "UPSTREAM_STATUS_ERROR");
    assert_eq!(create_mock.hits(), 0);
}

#[tokio::test]
async fn invalid_submission_makes_no_collaborator_calls() {
    let comments = MockServer::start();
    let censor = MockServer::start();

    let censor_mock = censor.mock(|when, then| {
        when.method(POST).path("/censor");
        then.status(200);
    });
    let create_mock = comments.mock(|when, then| {
        when.method(POST).path("/comments/5");
        then.status(201);
    });

    let app = spawn_app(upstreams(&comments, &censor)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/news/5/comments", app.address))
        .json(&json!({"author": "", "text": "hello"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/news/5/comments", app.address))
        .json(&json!({"author": "u1", "text": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    assert_eq!(censor_mock.hits(), 0);
    assert_eq!(create_mock.hits(), 0);
}

#[tokio::test]
async fn comment_store_fault_after_approval_is_an_upstream_error() {
    let comments = MockServer::start();
    let censor = MockServer::start();

    censor.mock(|when, then| {
        when.method(POST).path("/censor");
        then.status(200);
    });
    let create_mock = comments.mock(|when, then| {
        when.method(POST).path("/comments/5");
        then.status(500).body("insert failed");
    });

    let app = spawn_app(upstreams(&comments, &censor)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/news/5/comments", app.address))
        .json(&json!({"author": "u1", "text": "fine text"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    // Persistence was attempted exactly once, never retried
    assert_eq!(create_mock.hits(), 1);
}

#[tokio::test]
async fn comments_for_an_item_are_proxied_through() {
    let comments = MockServer::start();
    let censor = MockServer::start();

    let list_mock = comments.mock(|when, then| {
        when.method(GET)
            .path("/comments/3")
            .query_param("request_id", "rid-3");
        then.status(200).json_body(json!([
            {
                "id": 11,
                "news_id": 3,
                "author": "u2",
                "text": "newest",
                "parent_id": 0,
                "created_at": "2024-05-02T08:00:00Z"
            },
            {
                "id": 10,
                "news_id": 3,
                "author": "u1",
                "text": "older",
                "parent_id": 0,
                "created_at": "2024-05-01T08:00:00Z"
            }
        ]));
    });

    let app = spawn_app(upstreams(&comments, &censor)).await;

    let response = reqwest::get(format!("{}/news/3/comments?request_id=rid-3", app.address))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["text"], "newest");
    assert_eq!(body[1]["text"], "older");

    list_mock.assert();
}
