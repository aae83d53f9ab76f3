//! Article body extraction from HTML pages.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::utils::text::{char_len, collapse_whitespace, take_chars};

pub const MAX_CONTENT_CHARS: usize = 500;
const MIN_PARAGRAPH_CHARS: usize = 20;
const PARAGRAPHS_PER_SELECTOR: usize = 3;
const FALLBACK_PARAGRAPHS: usize = 5;

static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [".post-content p", ".entry-content p", ".content p", "article p"]
        .iter()
        .map(|s| Selector::parse(s).expect("static selector"))
        .collect()
});

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("static selector"));

fn paragraph_text(element: ElementRef<'_>) -> Option<String> {
    let text = collapse_whitespace(&element.text().collect::<String>());
    (char_len(&text) > MIN_PARAGRAPH_CHARS).then_some(text)
}

/// Pulls the lead paragraphs out of an article page.
///
/// The first content selector that matches anything decides the source: up
/// to three of its paragraphs are used. If none of them are long enough the
/// page's first five `<p>` elements are tried instead.
#[must_use]
pub fn extract_article_content(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let mut parts: Vec<String> = Vec::new();
    for selector in CONTENT_SELECTORS.iter() {
        let mut matches = document.select(selector).peekable();
        if matches.peek().is_some() {
            parts.extend(
                matches
                    .take(PARAGRAPHS_PER_SELECTOR)
                    .filter_map(paragraph_text),
            );
            break;
        }
    }

    if parts.is_empty() {
        parts.extend(
            document
                .select(&PARAGRAPH_SELECTOR)
                .take(FALLBACK_PARAGRAPHS)
                .filter_map(paragraph_text),
        );
    }

    let content = parts.join(" ");
    if content.is_empty() {
        return None;
    }

    if char_len(&content) > MAX_CONTENT_CHARS {
        Some(format!("{}...", take_chars(&content, MAX_CONTENT_CHARS)))
    } else {
        Some(content)
    }
}
