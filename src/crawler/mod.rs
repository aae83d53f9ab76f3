//! TechOrange crawler: RSS feed first, site search to fill the gap.

pub mod content;
pub mod feed;
pub mod matching;
pub mod search;

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::core::config::AppConfig;
use crate::core::models::Article;
use crate::errors::BotError;
use crate::worker::pipeline::{ArticleSource, pause};
use content::extract_article_content;
use feed::{FeedEntry, parse_feed};
use matching::{KeywordMatcher, MatchTier, ScoredArticle, rank_candidates};
use search::{SearchHit, build_search_url, extract_search_hits};

/// Placeholder content when an article page cannot be read.
pub const CONTENT_UNAVAILABLE: &str = "無法擷取內容摘要";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const SEARCH_EXTRA_TERMS: usize = 3;

/// Pauses between page fetches so the site is not hammered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlDelays {
    pub after_feed_article: Duration,
    pub after_search_article: Duration,
    pub between_searches: Duration,
}

impl Default for CrawlDelays {
    fn default() -> Self {
        Self {
            after_feed_article: Duration::from_millis(500),
            after_search_article: Duration::from_millis(300),
            between_searches: Duration::from_millis(500),
        }
    }
}

impl CrawlDelays {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            after_feed_article: Duration::ZERO,
            after_search_article: Duration::ZERO,
            between_searches: Duration::ZERO,
        }
    }
}

pub struct Crawler {
    http: Client,
    site_base: String,
    feed_url: String,
    delays: CrawlDelays,
}

impl Crawler {
    /// # Errors
    ///
    /// Returns `ConfigError` for an unusable site or feed URL and `HttpError`
    /// if the HTTP client cannot be built.
    pub fn new(site_base: &str, feed_url: &str) -> Result<Self, BotError> {
        Url::parse(site_base)
            .map_err(|e| BotError::ConfigError(format!("news site base {site_base:?}: {e}")))?;
        Url::parse(feed_url)
            .map_err(|e| BotError::ConfigError(format!("news feed url {feed_url:?}: {e}")))?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            site_base: site_base.trim_end_matches('/').to_string(),
            feed_url: feed_url.to_string(),
            delays: CrawlDelays::default(),
        })
    }

    /// # Errors
    ///
    /// Returns `HttpError` if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        Self::new(&config.news_site_base, &config.news_feed_url)
    }

    #[must_use]
    pub fn with_delays(mut self, delays: CrawlDelays) -> Self {
        self.delays = delays;
        self
    }

    /// Up to `n` articles relevant to `keyword`, exact title matches first.
    ///
    /// Never fails: feed or search errors only shrink the result.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_articles(&self, keyword: &str, n: usize) -> Vec<Article> {
        if n == 0 || keyword.trim().is_empty() {
            return Vec::new();
        }

        let matcher = KeywordMatcher::new(keyword);

        let mut articles = match self.fetch_from_rss(&matcher, n).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("RSS crawl failed: {}", e);
                Vec::new()
            }
        };

        if articles.len() < n {
            let seen: HashSet<String> = articles.iter().map(|a| a.url.clone()).collect();
            let remaining = n - articles.len();
            let extra = self
                .fetch_from_search(keyword.trim(), &matcher, remaining, seen)
                .await;
            articles.extend(extra);
        }

        articles.truncate(n);
        info!(count = articles.len(), "Crawled articles for keyword");
        articles
    }

    /// The newest `n` feed entries, in feed order.
    #[instrument(level = "info", skip(self))]
    pub async fn latest_articles(&self, n: usize) -> Vec<Article> {
        if n == 0 {
            return Vec::new();
        }

        let entries = match self.fetch_feed().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to fetch feed: {}", e);
                return Vec::new();
            }
        };

        let articles: Vec<Article> = stream::iter(entries.into_iter().take(n))
            .then(|entry| async move {
                let content = self.content_for_entry(&entry).await;
                pause(self.delays.after_feed_article).await;
                Article {
                    title: entry.title,
                    url: entry.link,
                    content,
                    published: entry.published,
                }
            })
            .collect()
            .await;

        info!(count = articles.len(), "Fetched latest articles");
        articles
    }

    async fn fetch_feed(&self) -> Result<Vec<FeedEntry>, BotError> {
        let bytes = self
            .http
            .get(&self.feed_url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        parse_feed(&bytes)
    }

    async fn fetch_from_rss(
        &self,
        matcher: &KeywordMatcher,
        n: usize,
    ) -> Result<Vec<Article>, BotError> {
        let entries = self.fetch_feed().await?;
        debug!(entries = entries.len(), "Scanning feed entries");

        let mut candidates = Vec::new();
        let mut exact_matches = 0;

        for entry in entries {
            let score = matcher.score(&entry.title);
            if score == 0 || entry.link.is_empty() {
                continue;
            }

            let content = self.content_for_entry(&entry).await;
            if MatchTier::of(score) == MatchTier::Exact {
                exact_matches += 1;
            }
            candidates.push(ScoredArticle {
                article: Article {
                    title: entry.title,
                    url: entry.link,
                    content,
                    published: entry.published,
                },
                score,
            });

            pause(self.delays.after_feed_article).await;

            if exact_matches >= n {
                break;
            }
        }

        info!(
            exact = exact_matches,
            fuzzy = candidates.len() - exact_matches,
            "Feed candidates scored"
        );
        Ok(rank_candidates(candidates, n))
    }

    async fn fetch_from_search(
        &self,
        keyword: &str,
        matcher: &KeywordMatcher,
        n: usize,
        mut seen: HashSet<String>,
    ) -> Vec<Article> {
        let wanted = n * 2;
        let terms: Vec<&str> = std::iter::once(keyword)
            .chain(
                matcher
                    .terms()
                    .iter()
                    .skip(1)
                    .take(SEARCH_EXTRA_TERMS)
                    .map(String::as_str),
            )
            .collect();

        let mut candidates = Vec::new();

        for term in terms {
            if candidates.len() >= wanted {
                break;
            }

            let hits = match self.search_page(term).await {
                Ok(hits) => hits,
                Err(e) => {
                    warn!(term, "Search request failed: {}", e);
                    continue;
                }
            };

            for hit in hits {
                if candidates.len() >= wanted {
                    break;
                }
                if !seen.insert(hit.url.clone()) {
                    continue;
                }

                let score = matcher.score(&hit.title);
                if score == 0 {
                    continue;
                }

                let content = self
                    .fetch_content(&hit.url)
                    .await
                    .unwrap_or_else(|| CONTENT_UNAVAILABLE.to_string());
                candidates.push(ScoredArticle {
                    article: Article {
                        title: hit.title,
                        url: hit.url,
                        content,
                        published: None,
                    },
                    score,
                });

                pause(self.delays.after_search_article).await;
            }

            pause(self.delays.between_searches).await;
        }

        let articles = rank_candidates(candidates, n);
        info!(count = articles.len(), "Search results ranked");
        articles
    }

    async fn search_page(&self, term: &str) -> Result<Vec<SearchHit>, BotError> {
        let url = build_search_url(&self.site_base, term)?;
        let html = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(extract_search_hits(&html, &self.site_base))
    }

    async fn content_for_entry(&self, entry: &FeedEntry) -> String {
        if let Some(content) = self.fetch_content(&entry.link).await {
            return content;
        }
        if entry.description.is_empty() {
            CONTENT_UNAVAILABLE.to_string()
        } else {
            entry.description.clone()
        }
    }

    async fn fetch_content(&self, url: &str) -> Option<String> {
        let html = match self.http.get(url).send().await {
            Ok(resp) => match resp.error_for_status() {
                Ok(resp) => resp.text().await.ok()?,
                Err(e) => {
                    warn!(url, "Article request failed: {}", e);
                    return None;
                }
            },
            Err(e) => {
                warn!(url, "Article request failed: {}", e);
                return None;
            }
        };

        let content = extract_article_content(&html);
        if content.is_none() {
            debug!(url, "No article paragraphs found");
        }
        content
    }
}

#[async_trait]
impl ArticleSource for Crawler {
    async fn search(&self, keyword: &str, n: usize) -> Vec<Article> {
        self.fetch_articles(keyword, n).await
    }

    async fn latest(&self, n: usize) -> Vec<Article> {
        self.latest_articles(n).await
    }
}
