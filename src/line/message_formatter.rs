use chrono_tz::Tz;

use crate::core::models::SummarizedArticle;
use crate::utils::text::{char_len, take_chars, truncate_with_ellipsis};

/// Length the bot aims for, leaving headroom under the 5000 character hard limit.
pub const MESSAGE_TARGET_LEN: usize = 4900;

/// Below this many characters a shortened summary is not worth sending.
const MIN_TRUNCATED_SUMMARY: usize = 100;
const DIGEST_SUMMARY_LEN: usize = 100;
const TRUNCATION_NOTICE: &str = "\n...(內容過長，已截斷)";

pub const ENTER_KEYWORD_MESSAGE: &str = "請輸入關鍵字來搜尋 TechOrange 文章！";
pub const REQUEST_FAILED_MESSAGE: &str = "抱歉，處理您的請求時發生錯誤，請稍後再試。";
pub const NEWS_UNAVAILABLE_MESSAGE: &str = "抱歉，目前抓不到新聞，稍後再試";
pub const HELP_MESSAGE: &str = "📖 使用方式：\n\
    • 直接輸入關鍵字（例如：AI、區塊鏈、電商）搜尋 TechOrange 相關文章並取得 AI 摘要\n\
    • 輸入 /news 取得最新 3 則新聞\n\
    • 輸入 /news N 或「新聞 N」取得最新 N 則新聞（1-10 則）";

fn render_article(index: usize, title: &str, summary: &str, url: &str) -> String {
    format!("📰 文章 {index}\n\n📝 標題：{title}\n\n🤖 AI 摘要：\n{summary}\n\n🔗 閱讀全文：{url}")
}

/// One message per article. Long summaries are shortened so the title and
/// link always survive.
#[must_use]
pub fn format_article_message(article: &SummarizedArticle, index: usize) -> String {
    let title = &article.article.title;
    let url = &article.article.url;
    let message = render_article(index, title, &article.summary, url);
    if char_len(&message) <= MESSAGE_TARGET_LEN {
        return message;
    }

    let overhead = char_len(&render_article(index, title, "", url));
    let room = MESSAGE_TARGET_LEN.saturating_sub(overhead);
    if room > MIN_TRUNCATED_SUMMARY {
        let summary = truncate_with_ellipsis(&article.summary, room);
        render_article(index, title, &summary, url)
    } else {
        message
    }
}

#[must_use]
pub fn format_searching_message(keyword: &str) -> String {
    format!("正在搜尋「{keyword}」相關的 TechOrange 文章，請稍候...")
}

#[must_use]
pub fn format_fetching_latest_message(count: usize) -> String {
    format!("正在取得最新 {count} 則 TechOrange 新聞，請稍候...")
}

#[must_use]
pub fn format_results_header(count: usize, keyword: &str) -> String {
    format!("📰 找到 {count} 篇與「{keyword}」相關的 TechOrange 文章：")
}

#[must_use]
pub fn format_no_results(keyword: &str) -> String {
    format!("抱歉，沒有找到與「{keyword}」相關的 TechOrange 文章。請嘗試其他關鍵字。")
}

/// Compact numbered list for the latest-news command.
#[must_use]
pub fn format_news_digest(articles: &[SummarizedArticle], tz: Tz) -> String {
    let mut blocks = vec!["📰 最新新聞摘要".to_string()];

    for (i, item) in articles.iter().enumerate() {
        let mut block = format!("{}. {}", i + 1, item.article.title);
        if let Some(published) = item.article.published {
            block.push_str(&format!(
                "\n🕒 {}",
                published.with_timezone(&tz).format("%Y-%m-%d %H:%M")
            ));
        }
        let summary = if char_len(&item.summary) > DIGEST_SUMMARY_LEN {
            format!("{}...", take_chars(&item.summary, DIGEST_SUMMARY_LEN))
        } else {
            item.summary.clone()
        };
        if !summary.is_empty() {
            block.push('\n');
            block.push_str(&summary);
        }
        if !item.article.url.is_empty() {
            block.push_str(&format!("\n🔗 {}", item.article.url));
        }
        blocks.push(block);
    }

    let digest = blocks.join("\n\n");
    if char_len(&digest) > MESSAGE_TARGET_LEN {
        format!("{}{}", take_chars(&digest, MESSAGE_TARGET_LEN), TRUNCATION_NOTICE)
    } else {
        digest
    }
}
