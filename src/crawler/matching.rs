//! Fuzzy keyword matching and relevance ranking for article titles.
//!
//! A keyword is expanded into a small set of related terms (synonyms from a
//! fixed tech glossary plus a stem with common suffixes removed). Titles are
//! then scored on a 0..=100 scale:
//!
//! | condition                                        | points     |
//! |--------------------------------------------------|------------|
//! | keyword is a substring of the title              | 100        |
//! | otherwise, an expanded term of 3+ chars matches  | 80         |
//! | otherwise, a shorter expanded term matches       | 60         |
//! | title starts with the keyword or any term        | +10        |
//! | keyword or any term occurs as a whole word       | +5 (once)  |
//!
//! Bonuses are capped at 100. A score of 100 is an exact match and outranks
//! every fuzzy match regardless of order in the feed.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::models::Article;
use crate::utils::text::char_len;

pub const EXACT_MATCH_SCORE: u32 = 100;
const SYNONYM_SCORE: u32 = 80;
const SHORT_TERM_SCORE: u32 = 60;
const PREFIX_BONUS: u32 = 10;
const WHOLE_WORD_BONUS: u32 = 5;

const STRIPPED_SUFFIXES: [&str; 3] = ["技術", "產業", "公司"];

static TECH_SYNONYMS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (
            "ai",
            &["人工智慧", "機器學習", "machine learning", "artificial intelligence", "深度學習"][..],
        ),
        (
            "人工智慧",
            &["ai", "artificial intelligence", "機器學習", "深度學習"][..],
        ),
        ("blockchain", &["區塊鏈", "比特幣", "bitcoin", "加密貨幣"][..]),
        ("區塊鏈", &["blockchain", "比特幣", "bitcoin", "加密貨幣"][..]),
        ("5g", &["第五代", "5g網路", "行動通訊"][..]),
        ("iot", &["物聯網", "internet of things", "智慧家居"][..]),
        ("物聯網", &["iot", "internet of things", "智慧家居"][..]),
        ("vr", &["虛擬實境", "virtual reality", "ar", "擴增實境"][..]),
        ("虛擬實境", &["vr", "virtual reality", "ar", "擴增實境"][..]),
        ("ar", &["擴增實境", "augmented reality", "vr", "虛擬實境"][..]),
        ("擴增實境", &["ar", "augmented reality", "vr", "虛擬實境"][..]),
        ("fintech", &["金融科技", "數位金融", "行動支付"][..]),
        ("金融科技", &["fintech", "數位金融", "行動支付"][..]),
        ("startup", &["新創", "創業", "新創公司"][..]),
        ("新創", &["startup", "創業", "新創公司"][..]),
        ("ecommerce", &["電商", "電子商務", "網購"][..]),
        ("電商", &["ecommerce", "電子商務", "網購"][..]),
        ("cloud", &["雲端", "雲計算", "雲服務"][..]),
        ("雲端", &["cloud", "雲計算", "雲服務"][..]),
    ])
});

/// Expands a keyword into related search terms. The (lower-cased) keyword is
/// always first; the rest keep glossary order with duplicates removed.
#[must_use]
pub fn generate_fuzzy_keywords(keyword: &str) -> Vec<String> {
    let keyword = keyword.trim().to_lowercase();
    let mut terms = vec![keyword.clone()];
    let mut push = |term: String| {
        if !term.is_empty() && !terms.contains(&term) {
            terms.push(term);
        }
    };

    if let Some(synonyms) = TECH_SYNONYMS.get(keyword.as_str()) {
        for synonym in *synonyms {
            push(synonym.to_lowercase());
        }
    }

    if char_len(&keyword) >= 3 {
        let base = STRIPPED_SUFFIXES
            .iter()
            .fold(keyword.clone(), |acc, suffix| acc.replace(suffix, ""));
        if base != keyword && char_len(&base) >= 2 {
            push(base);
        }
    }

    terms
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Fuzzy,
}

impl MatchTier {
    #[must_use]
    pub fn of(score: u32) -> Self {
        if score >= EXACT_MATCH_SCORE {
            MatchTier::Exact
        } else {
            MatchTier::Fuzzy
        }
    }
}

/// Scores titles against one keyword. Build once per query; the whole-word
/// patterns are compiled up front.
#[derive(Debug)]
pub struct KeywordMatcher {
    keyword: String,
    terms: Vec<String>,
    word_patterns: Vec<Regex>,
}

impl KeywordMatcher {
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        let terms = generate_fuzzy_keywords(keyword);
        let keyword = terms.first().cloned().unwrap_or_default();
        let word_patterns = terms
            .iter()
            .filter(|t| !t.is_empty())
            .filter_map(|t| Regex::new(&format!(r"\b{}\b", regex::escape(t))).ok())
            .collect();

        Self {
            keyword,
            terms,
            word_patterns,
        }
    }

    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Expanded terms, starting with the keyword itself.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns 0 for no match and 100 for an exact match.
    #[must_use]
    pub fn score(&self, title: &str) -> u32 {
        let title = title.trim().to_lowercase();
        if title.is_empty() || self.keyword.is_empty() {
            return 0;
        }

        let mut score = if title.contains(&self.keyword) {
            EXACT_MATCH_SCORE
        } else {
            self.terms
                .iter()
                .filter(|t| !t.is_empty() && title.contains(t.as_str()))
                .map(|t| {
                    if char_len(t) >= 3 {
                        SYNONYM_SCORE
                    } else {
                        SHORT_TERM_SCORE
                    }
                })
                .max()
                .unwrap_or(0)
        };

        if self
            .terms
            .iter()
            .any(|t| !t.is_empty() && title.starts_with(t.as_str()))
        {
            score = (score + PREFIX_BONUS).min(EXACT_MATCH_SCORE);
        }

        if self.word_patterns.iter().any(|re| re.is_match(&title)) {
            score = (score + WHOLE_WORD_BONUS).min(EXACT_MATCH_SCORE);
        }

        score
    }
}

#[derive(Debug, Clone)]
pub struct ScoredArticle {
    pub article: Article,
    pub score: u32,
}

/// Exact matches first, then fuzzy ones; each tier by score descending with
/// feed order kept for ties.
#[must_use]
pub fn rank_candidates(candidates: Vec<ScoredArticle>, n: usize) -> Vec<Article> {
    let (mut exact, mut fuzzy): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .filter(|c| c.score > 0)
        .partition(|c| MatchTier::of(c.score) == MatchTier::Exact);

    exact.sort_by(|a, b| b.score.cmp(&a.score));
    fuzzy.sort_by(|a, b| b.score.cmp(&a.score));

    exact
        .into_iter()
        .chain(fuzzy)
        .take(n)
        .map(|c| c.article)
        .collect()
}
