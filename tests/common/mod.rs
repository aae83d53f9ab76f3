//! In-memory fakes for the pipeline seams.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use linenews::core::models::Article;
use linenews::errors::BotError;
use linenews::worker::{ArticleSource, Messenger, Pacing, Pipeline, Summarizer};

pub fn article(title: &str, content: &str) -> Article {
    Article {
        title: title.to_string(),
        url: format!("https://buzzorange.com/techorange/2024/05/01/{}/", title.len()),
        content: content.to_string(),
        published: None,
    }
}

#[derive(Default)]
pub struct FakeSource {
    pub search_results: Vec<Article>,
    pub latest_results: Vec<Article>,
    pub calls: Mutex<Vec<String>>,
}

#[async_trait]
impl ArticleSource for FakeSource {
    async fn search(&self, keyword: &str, n: usize) -> Vec<Article> {
        self.calls.lock().unwrap().push(format!("search:{keyword}:{n}"));
        self.search_results.iter().take(n).cloned().collect()
    }

    async fn latest(&self, n: usize) -> Vec<Article> {
        self.calls.lock().unwrap().push(format!("latest:{n}"));
        self.latest_results.iter().take(n).cloned().collect()
    }
}

/// Summarizes as `摘要：<title>`; titles containing `fail` produce an error.
pub struct FakeSummarizer;

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, title: &str, _content: &str) -> Result<String, BotError> {
        if title.contains("fail") {
            Err(BotError::QuotaExceeded("all models".to_string()))
        } else {
            Ok(format!("摘要：{title}"))
        }
    }
}

/// Records every call. Pushes whose first message contains `fail_on` fail.
#[derive(Default)]
pub struct RecordingMessenger {
    pub replies: Mutex<Vec<(String, Vec<String>)>>,
    pub pushes: Mutex<Vec<(String, Vec<String>)>>,
    pub fail_on: Option<String>,
    pub fail_replies: bool,
}

impl RecordingMessenger {
    pub fn pushed_texts(&self) -> Vec<String> {
        self.pushes
            .lock()
            .unwrap()
            .iter()
            .flat_map(|(_, messages)| messages.clone())
            .collect()
    }

    pub fn push_targets(&self) -> Vec<String> {
        self.pushes
            .lock()
            .unwrap()
            .iter()
            .map(|(to, _)| to.clone())
            .collect()
    }

    pub fn reply_texts(&self) -> Vec<String> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .flat_map(|(_, messages)| messages.clone())
            .collect()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn reply(&self, reply_token: &str, messages: &[String]) -> Result<(), BotError> {
        self.replies
            .lock()
            .unwrap()
            .push((reply_token.to_string(), messages.to_vec()));
        if self.fail_replies {
            return Err(BotError::LineApiError("invalid reply token".to_string()));
        }
        Ok(())
    }

    async fn push(&self, to: &str, messages: &[String]) -> Result<(), BotError> {
        self.pushes
            .lock()
            .unwrap()
            .push((to.to_string(), messages.to_vec()));
        if let Some(pattern) = &self.fail_on {
            if messages.first().is_some_and(|m| m.contains(pattern.as_str())) {
                return Err(BotError::LineApiError("push failed".to_string()));
            }
        }
        Ok(())
    }
}

pub fn pipeline(source: FakeSource, messenger: Arc<RecordingMessenger>) -> Pipeline {
    Pipeline {
        source: Arc::new(source),
        summarizer: Arc::new(FakeSummarizer),
        messenger,
        pacing: Pacing::none(),
        timezone: chrono_tz::Asia::Taipei,
    }
}
