use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A crawled article ready for summarization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub content: String,
    pub published: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizedArticle {
    pub article: Article,
    pub summary: String,
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskRequest {
    KeywordSearch { keyword: String, count: usize },
    LatestNews { count: usize },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingTask {
    pub correlation_id: String,
    pub user_id: String,
    /// Push destination: the group or room the message came from, else the user.
    pub target_id: String,
    pub request: TaskRequest,
}
