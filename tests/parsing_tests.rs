use linenews::api::parsing::{UserIntent, parse_user_intent, parse_webhook_body};
use linenews::errors::BotError;

#[test]
fn test_text_events_are_extracted() {
    let body = r#"{
        "destination": "Ubot",
        "events": [
            {
                "type": "message",
                "replyToken": "reply-1",
                "source": {"type": "user", "userId": "U1"},
                "message": {"type": "text", "id": "1", "text": "AI"}
            },
            {
                "type": "message",
                "replyToken": "reply-2",
                "source": {"type": "group", "groupId": "G1", "userId": "U2"},
                "message": {"type": "text", "id": "2", "text": "/news 5"}
            },
            {
                "type": "message",
                "replyToken": "reply-3",
                "source": {"type": "room", "roomId": "R1", "userId": "U3"},
                "message": {"type": "text", "id": "3", "text": "雲端"}
            }
        ]
    }"#;

    let events = parse_webhook_body(body).unwrap();
    assert_eq!(events.len(), 3);

    assert_eq!(events[0].user_id, "U1");
    assert_eq!(events[0].target_id, "U1");
    assert_eq!(events[0].reply_token, "reply-1");
    assert_eq!(events[0].text, "AI");

    assert_eq!(events[1].user_id, "U2");
    assert_eq!(events[1].target_id, "G1");

    assert_eq!(events[2].target_id, "R1");
}

#[test]
fn test_non_text_events_are_skipped() {
    let body = r#"{
        "events": [
            {"type": "follow", "replyToken": "r", "source": {"userId": "U1"}},
            {
                "type": "message",
                "replyToken": "r",
                "source": {"userId": "U1"},
                "message": {"type": "sticker", "packageId": "1", "stickerId": "1"}
            },
            {
                "type": "message",
                "replyToken": "r",
                "source": {},
                "message": {"type": "text", "text": "no target"}
            }
        ]
    }"#;

    assert!(parse_webhook_body(body).unwrap().is_empty());
}

#[test]
fn test_body_without_events_is_empty() {
    assert!(parse_webhook_body("{}").unwrap().is_empty());
    assert!(parse_webhook_body(r#"{"events": "nope"}"#).unwrap().is_empty());
}

#[test]
fn test_invalid_body_is_a_parse_error() {
    assert!(matches!(
        parse_webhook_body("not json"),
        Err(BotError::ParseError(_))
    ));
    assert!(matches!(
        parse_webhook_body("[1, 2, 3]"),
        Err(BotError::ParseError(_))
    ));
}

#[test]
fn test_help_and_empty_intents() {
    assert_eq!(parse_user_intent("   "), UserIntent::Empty);
    for text in ["help", "HELP", "/help", "?", "？", "說明", "幫助"] {
        assert_eq!(parse_user_intent(text), UserIntent::Help, "{text}");
    }
}

#[test]
fn test_latest_news_intent_counts() {
    let cases = [
        ("/news", 3),
        ("/NEWS", 3),
        ("/news 5", 5),
        ("/news5", 5),
        ("新聞 2", 2),
        ("新聞", 3),
        ("/news 0", 1),
        ("/news 42", 10),
        ("/news 99999999999999999999999", 10),
    ];

    for (text, count) in cases {
        assert_eq!(
            parse_user_intent(text),
            UserIntent::LatestNews { count },
            "{text}"
        );
    }
}

#[test]
fn test_full_width_counts_are_read() {
    let cases = [
        ("新聞 ５", 5),
        ("/news ３", 3),
        ("/news１０", 10),
        ("新聞 ０", 1),
        ("/news ９９", 10),
    ];

    for (text, count) in cases {
        assert_eq!(
            parse_user_intent(text),
            UserIntent::LatestNews { count },
            "{text}"
        );
    }
}

#[test]
fn test_everything_else_is_a_keyword_search() {
    assert_eq!(
        parse_user_intent("  區塊鏈  "),
        UserIntent::KeywordSearch {
            keyword: "區塊鏈".to_string()
        }
    );
    assert_eq!(
        parse_user_intent("/news abc"),
        UserIntent::KeywordSearch {
            keyword: "/news abc".to_string()
        }
    );
}
