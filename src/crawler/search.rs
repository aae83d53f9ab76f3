//! Site search result scraping.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

use crate::errors::BotError;
use crate::utils::text::{char_len, collapse_whitespace};

const MIN_TITLE_CHARS: usize = 10;

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
}

/// `{base}/?s=<term>&post_type=post`
///
/// # Errors
///
/// Returns `CrawlError` when the base is not a valid URL.
pub fn build_search_url(site_base: &str, term: &str) -> Result<Url, BotError> {
    let mut url = Url::parse(&format!("{}/", site_base.trim_end_matches('/')))?;
    url.query_pairs_mut()
        .append_pair("s", term)
        .append_pair("post_type", "post");
    Ok(url)
}

/// Article links on a search page: same-site URLs with a dated path
/// (`/20xx/...`) and a title long enough to be a headline.
#[must_use]
pub fn extract_search_hits(html: &str, site_base: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);

    document
        .select(&LINK_SELECTOR)
        .filter_map(|link| {
            let href = link.value().attr("href")?.trim();
            if !href.contains(site_base) || !href.contains("/20") {
                return None;
            }
            let title = collapse_whitespace(&link.text().collect::<String>());
            (char_len(&title) > MIN_TITLE_CHARS).then(|| SearchHit {
                title,
                url: href.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://buzzorange.com/techorange";

    #[test]
    fn builds_encoded_query() {
        let url = build_search_url(BASE, "人工智慧 AI").unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(url.path(), "/techorange/");
        assert_eq!(
            pairs,
            vec![
                ("s".to_string(), "人工智慧 AI".to_string()),
                ("post_type".to_string(), "post".to_string())
            ]
        );
    }

    #[test]
    fn keeps_only_dated_site_links_with_real_titles() {
        let html = r#"<html><body>
            <a href="https://buzzorange.com/techorange/2025/03/01/ai-chip/">AI 晶片大戰正式開打，台廠如何應對</a>
            <a href="https://buzzorange.com/techorange/about/">About TechOrange and our editorial team</a>
            <a href="https://other.example.com/2025/03/01/x/">Unrelated site article title here</a>
            <a href="https://buzzorange.com/techorange/2025/03/02/short/">短標題</a>
        </body></html>"#;

        let hits = extract_search_hits(html, BASE);
        assert_eq!(
            hits,
            vec![SearchHit {
                title: "AI 晶片大戰正式開打，台廠如何應對".to_string(),
                url: "https://buzzorange.com/techorange/2025/03/01/ai-chip/".to_string(),
            }]
        );
    }

    #[test]
    fn drops_titles_of_ten_characters_or_fewer() {
        let html = r#"<html><body>
            <a href="https://buzzorange.com/techorange/2025/04/01/ten/">一二三四五六七八九十</a>
            <a href="https://buzzorange.com/techorange/2025/04/02/eleven/">一二三四五六七八九十壹</a>
        </body></html>"#;

        let hits = extract_search_hits(html, BASE);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "一二三四五六七八九十壹");
    }
}
