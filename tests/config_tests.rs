use std::collections::HashMap;

use linenews::core::config::{AppConfig, DEFAULT_GEMINI_MODELS, DEFAULT_PORT};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

const REQUIRED: [(&str, &str); 2] = [
    ("LINE_CHANNEL_SECRET", "secret"),
    ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
];

#[test]
fn test_defaults_with_only_required_values() {
    let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();

    assert_eq!(config.line_channel_secret, "secret");
    assert_eq!(config.line_channel_access_token, "token");
    assert_eq!(config.gemini_api_key, None);
    assert_eq!(config.gemini_models.len(), DEFAULT_GEMINI_MODELS.len());
    assert_eq!(config.gemini_models[0], "gemini-2.0-flash-lite");
    assert_eq!(config.news_site_base, "https://buzzorange.com/techorange");
    assert_eq!(
        config.news_feed_url,
        "https://buzzorange.com/techorange/feed/"
    );
    assert_eq!(config.article_count, 3);
    assert_eq!(config.timezone, chrono_tz::Asia::Taipei);
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
fn test_missing_required_value_is_reported() {
    let err = AppConfig::from_lookup(lookup(&[("LINE_CHANNEL_SECRET", "secret")])).unwrap_err();
    assert_eq!(
        err,
        "LINE_CHANNEL_ACCESS_TOKEN: environment variable not found"
    );

    // Blank counts as unset
    let err = AppConfig::from_lookup(lookup(&[
        ("LINE_CHANNEL_SECRET", "   "),
        ("LINE_CHANNEL_ACCESS_TOKEN", "token"),
    ]))
    .unwrap_err();
    assert!(err.starts_with("LINE_CHANNEL_SECRET"));
}

#[test]
fn test_overrides_are_applied() {
    let mut pairs = REQUIRED.to_vec();
    pairs.extend([
        ("GEMINI_API_KEY", "g-key"),
        ("GEMINI_MODELS", " model-a , ,model-b "),
        ("NEWS_SITE_BASE", "http://localhost:9000/news/"),
        ("ARTICLE_COUNT", "5"),
        ("BOT_TIMEZONE", "UTC"),
        ("PORT", "8080"),
    ]);
    let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();

    assert_eq!(config.gemini_api_key.as_deref(), Some("g-key"));
    assert_eq!(config.gemini_models, vec!["model-a", "model-b"]);
    assert_eq!(config.news_site_base, "http://localhost:9000/news");
    assert_eq!(config.news_feed_url, "http://localhost:9000/news/feed/");
    assert_eq!(config.article_count, 5);
    assert_eq!(config.timezone, chrono_tz::UTC);
    assert_eq!(config.port, 8080);
}

#[test]
fn test_invalid_values_are_rejected() {
    let cases = [
        ("ARTICLE_COUNT", "0", "ARTICLE_COUNT"),
        ("ARTICLE_COUNT", "three", "ARTICLE_COUNT"),
        ("BOT_TIMEZONE", "Mars/Olympus", "BOT_TIMEZONE"),
        ("PORT", "70000", "PORT"),
        ("GEMINI_MODELS", ",,", "GEMINI_MODELS"),
    ];

    for (key, value, prefix) in cases {
        let mut pairs = REQUIRED.to_vec();
        pairs.push((key, value));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.starts_with(prefix), "{key}={value} gave {err}");
    }
}

#[test]
fn test_pipeline_builds_from_config() {
    let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
    let pipeline = linenews::worker::Pipeline::from_config(&config).unwrap();
    assert_eq!(pipeline.timezone, chrono_tz::Asia::Taipei);
    assert_eq!(pipeline.pacing, linenews::worker::Pacing::default());

    let mut pairs = REQUIRED.to_vec();
    pairs.push(("NEWS_SITE_BASE", "not a url"));
    let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
    assert!(linenews::worker::Pipeline::from_config(&config).is_err());
}
