//! Inbound payload classification and outbound notice rendering.
//!
//! The control tokens below are part of the wire protocol and must stay
//! bit-exact.

/// Clears the whole history when sent as the entire payload
pub const CLEAR_COMMAND: &str = "__clear__";
/// Marks a typing indicator
pub const TYPING_PREFIX: &str = "__typing__";
/// Marks an emotion reaction; the remainder is the emotion key
pub const EMOTION_PREFIX: &str = "__emotion__:";
/// Prefix of typing indicators relayed to the other participant
pub const TYPING_RELAY_PREFIX: &str = "__typing__:";

/// Broadcast after the history has been cleared
pub const CLEAR_NOTICE: &str = "Chat cleared by user.";
/// Sent to a connection that could not be admitted
pub const ROOM_FULL_NOTICE: &str = "Chat room full. Only 2 users allowed.";
/// Label substituted for the recipient's own name
pub const SELF_LABEL: &str = "You";

/// A classified inbound payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundMessage<'a> {
    Clear,
    Typing,
    Emotion { key: &'a str },
    Text { body: &'a str },
}

impl<'a> InboundMessage<'a> {
    /// Classify a raw payload.
    ///
    /// Rules are checked in order: clear, typing, emotion, plain text.
    pub fn classify(payload: &'a str) -> Self {
        if payload == CLEAR_COMMAND {
            InboundMessage::Clear
        } else if payload.starts_with(TYPING_PREFIX) {
            InboundMessage::Typing
        } else if let Some(key) = payload.strip_prefix(EMOTION_PREFIX) {
            InboundMessage::Emotion { key }
        } else {
            InboundMessage::Text { body: payload }
        }
    }
}

/// Display string for an emotion key; unknown keys pass through.
pub fn emotion_display(key: &str) -> String {
    match key {
        "love" => "❤️ Love".to_string(),
        "hug" => "🤗 Hug".to_string(),
        "kiss" => "😘 Kiss".to_string(),
        "miss" => "🥺 Miss you".to_string(),
        other => format!("✨ {}", other),
    }
}

/// Typing indicator line delivered to the other participant
pub fn render_typing(sender: &str, timestamp: &str) -> String {
    format!("{}{} {}", TYPING_RELAY_PREFIX, sender, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_clear_requires_exact_match() {
        // テスト項目: __clear__ は完全一致の場合のみクリア扱いになる
        // given (前提条件):
        let exact = "__clear__";
        let padded = "__clear__ ";

        // when (操作):
        let exact_result = InboundMessage::classify(exact);
        let padded_result = InboundMessage::classify(padded);

        // then (期待する結果):
        assert_eq!(exact_result, InboundMessage::Clear);
        assert_eq!(padded_result, InboundMessage::Text { body: "__clear__ " });
    }

    #[test]
    fn test_classify_typing_by_prefix() {
        // テスト項目: __typing__ で始まるペイロードはタイピング通知になる
        // given (前提条件):
        let payloads = ["__typing__", "__typing__:alice", "__typing__anything"];

        // when (操作) / then (期待する結果):
        for payload in payloads {
            assert_eq!(InboundMessage::classify(payload), InboundMessage::Typing);
        }
    }

    #[test]
    fn test_classify_emotion_strips_prefix() {
        // テスト項目: __emotion__: の後ろがエモーションキーになる
        // given (前提条件):
        let payload = "__emotion__:love";

        // when (操作):
        let result = InboundMessage::classify(payload);

        // then (期待する結果):
        assert_eq!(result, InboundMessage::Emotion { key: "love" });
    }

    #[test]
    fn test_classify_plain_text_is_verbatim() {
        // テスト項目: 制御トークン以外はそのままテキストになる
        // given (前提条件):
        let payload = "  hello __clear__  ";

        // when (操作):
        let result = InboundMessage::classify(payload);

        // then (期待する結果):
        assert_eq!(result, InboundMessage::Text { body: "  hello __clear__  " });
    }

    #[test]
    fn test_classify_emotion_prefix_without_colon_is_text() {
        // テスト項目: コロンのない __emotion__ はテキスト扱い
        // given (前提条件):
        let payload = "__emotion__love";

        // when (操作):
        let result = InboundMessage::classify(payload);

        // then (期待する結果):
        assert_eq!(result, InboundMessage::Text { body: "__emotion__love" });
    }

    #[test]
    fn test_emotion_display_known_keys() {
        // テスト項目: 既知のエモーションキーが表示文字列に変換される
        // given (前提条件):
        let cases = [
            ("love", "❤️ Love"),
            ("hug", "🤗 Hug"),
            ("kiss", "😘 Kiss"),
            ("miss", "🥺 Miss you"),
        ];

        // when (操作) / then (期待する結果):
        for (key, expected) in cases {
            assert_eq!(emotion_display(key), expected);
        }
    }

    #[test]
    fn test_emotion_display_unknown_key_passes_through() {
        // テスト項目: 未知のキーは ✨ 付きでそのまま表示される
        // given (前提条件):
        let key = "surprise";

        // when (操作):
        let result = emotion_display(key);

        // then (期待する結果):
        assert_eq!(result, "✨ surprise");
    }

    #[test]
    fn test_render_typing_is_tagged() {
        // テスト項目: タイピング通知はチャット行と区別できるプレフィックス付きになる
        // given (前提条件):
        let sender = "alice";

        // when (操作):
        let line = render_typing(sender, "[2024-05-01 09:30]");

        // then (期待する結果):
        assert_eq!(line, "__typing__:alice [2024-05-01 09:30]");
        assert!(line.starts_with(TYPING_RELAY_PREFIX));
    }
}
