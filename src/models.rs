use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page size fixed by the news store; the gateway shares the constant so the
/// pagination contract is testable on both sides of the wire.
pub const PAGE_SIZE: u32 = 15;

/// News item without its body, as returned in list responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsShort {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Full news item including the body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsFull {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Pagination envelope produced by the news store (camelCase on the wire).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_pages: u32,
    pub current_page: u32,
    pub page_size: u32,
}

/// One page of news as the news store returns it. The store serializes an
/// empty page as an explicit `null`, so `news` must tolerate both a missing
/// key and a null value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPage {
    #[serde(default, deserialize_with = "null_to_empty")]
    pub news: Vec<NewsShort>,
    pub pagination: Pagination,
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<Vec<NewsShort>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let news = Option::<Vec<NewsShort>>::deserialize(deserializer)?;
    Ok(news.unwrap_or_default())
}

/// A stored comment. `news_id` and `created_at` are assigned by the gateway
/// at acceptance time and never trusted from client input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    #[serde(default)]
    pub id: i64,
    pub news_id: i64,
    pub author: String,
    pub text: String,
    /// 0 means top-level; anything else is the parent comment's id.
    #[serde(default)]
    pub parent_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Client-supplied comment fields. Everything else on [`Comment`] is
/// gateway-assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct NewComment {
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub parent_id: i64,
}

/// Composite view joined by the fan-out aggregator. Never persisted; it
/// exists only for the duration of one response.
#[derive(Debug, Clone, Serialize)]
pub struct NewsDetail {
    pub news: NewsFull,
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Offset the news store derives from a 1-based page.
    fn offset(page: u32) -> u32 {
        (page - 1) * PAGE_SIZE
    }

    /// Total page count for a given item count, rounding up.
    fn total_pages(total_count: u32) -> u32 {
        total_count.div_ceil(PAGE_SIZE)
    }

    #[test]
    fn offset_is_zero_based_from_one_based_pages() {
        assert_eq!(offset(1), 0);
        assert_eq!(offset(2), 15);
        assert_eq!(offset(5), 60);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(15), 1);
        assert_eq!(total_pages(16), 2);
        assert_eq!(total_pages(45), 3);
    }

    #[test]
    fn news_page_tolerates_null_news_array() {
        let page: NewsPage = serde_json::from_str(
            r#"{"news": null, "pagination": {"totalPages": 0, "currentPage": 1, "pageSize": 15}}"#,
        )
        .unwrap();
        assert!(page.news.is_empty());
        assert_eq!(page.pagination.page_size, PAGE_SIZE);
    }

    #[test]
    fn news_page_tolerates_missing_news_key() {
        let page: NewsPage = serde_json::from_str(
            r#"{"pagination": {"totalPages": 0, "currentPage": 1, "pageSize": 15}}"#,
        )
        .unwrap();
        assert!(page.news.is_empty());
    }

    #[test]
    fn new_comment_defaults_parent_to_top_level() {
        let submission: NewComment =
            serde_json::from_str(r#"{"author": "u1", "text": "hello"}"#).unwrap();
        assert_eq!(submission.parent_id, 0);
    }
}
