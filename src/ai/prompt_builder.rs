/// Max characters of the title passed to the model
pub const MAX_TITLE_LEN: usize = 200;

/// Max characters of article content passed to the model
pub const MAX_CONTENT_LEN: usize = 4000;

/// Remove control characters (except newlines) and hard-truncate.
pub fn sanitize_field(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .take(max_len)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Builds the summary request for one article.
pub fn build_summary_prompt(title: &str, content: &str) -> String {
    let title = sanitize_field(title, MAX_TITLE_LEN);
    let content = sanitize_field(content, MAX_CONTENT_LEN);

    format!(
        "請針對以下科技新聞文章提供一個簡潔的中文摘要（大約100-150字）：\n\n\
         標題：{title}\n\n\
         內容：{content}\n\n\
         摘要要求：\n\
         1. 用繁體中文撰寫\n\
         2. 突出重點資訊\n\
         3. 保持客觀中性\n\
         4. 約100-150字\n\
         5. 適合LINE訊息閱讀\n\
         6. 只輸出摘要本身，不要加上標題或前言"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_control_chars_but_keeps_newlines() {
        assert_eq!(sanitize_field("a\u{0007}b\nc\t", 10), "ab\nc");
    }

    #[test]
    fn sanitize_truncates_by_chars() {
        assert_eq!(sanitize_field("人工智慧新聞", 4), "人工智慧");
    }

    #[test]
    fn prompt_embeds_clipped_content() {
        let content = "字".repeat(MAX_CONTENT_LEN + 50);
        let prompt = build_summary_prompt("標題", &content);
        assert!(prompt.contains("標題：標題"));
        assert!(prompt.contains(&"字".repeat(MAX_CONTENT_LEN)));
        assert!(!prompt.contains(&"字".repeat(MAX_CONTENT_LEN + 1)));
    }
}
