//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatRecord, DisplayName, Participant, RecordKind};
use crate::infrastructure::dto::{
    history::{ChatRecordDto, RecordKindDto},
    http::ParticipantDto,
};

// ========================================
// DTO → Domain Entity
// ========================================

impl From<RecordKindDto> for RecordKind {
    fn from(dto: RecordKindDto) -> Self {
        match dto {
            RecordKindDto::Text => RecordKind::Text,
            RecordKindDto::Emotion => RecordKind::Emotion,
        }
    }
}

impl From<ChatRecordDto> for ChatRecord {
    fn from(dto: ChatRecordDto) -> Self {
        Self {
            sender: DisplayName::new(dto.sender),
            body: dto.body,
            timestamp: dto.timestamp,
            kind: dto.kind.into(),
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<RecordKind> for RecordKindDto {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Text => RecordKindDto::Text,
            RecordKind::Emotion => RecordKindDto::Emotion,
        }
    }
}

impl From<&ChatRecord> for ChatRecordDto {
    fn from(model: &ChatRecord) -> Self {
        Self {
            sender: model.sender.as_str().to_string(),
            body: model.body.clone(),
            timestamp: model.timestamp.clone(),
            kind: model.kind.into(),
        }
    }
}

impl From<Participant> for ParticipantDto {
    fn from(model: Participant) -> Self {
        Self {
            name: model.name.into_string(),
            connected_at: model.connected_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionToken;
    use chrono::TimeZone;
    use futari_shared::time::jst_offset;

    #[test]
    fn test_dto_chat_record_to_domain() {
        // テスト項目: DTO の ChatRecordDto がドメインエンティティに変換される
        // given (前提条件):
        let dto = ChatRecordDto {
            sender: "alice".to_string(),
            body: "❤️ Love".to_string(),
            timestamp: "[2024-05-01 09:30]".to_string(),
            kind: RecordKindDto::Emotion,
        };

        // when (操作):
        let record: ChatRecord = dto.into();

        // then (期待する結果):
        assert_eq!(
            record,
            ChatRecord::emotion(DisplayName::new("alice"), "❤️ Love", "[2024-05-01 09:30]")
        );
    }

    #[test]
    fn test_domain_chat_record_to_dto() {
        // テスト項目: ドメインエンティティの ChatRecord が DTO に変換される
        // given (前提条件):
        let record = ChatRecord::text(DisplayName::new("bob"), "hi", "[2024-05-01 09:31]");

        // when (操作):
        let dto = ChatRecordDto::from(&record);

        // then (期待する結果):
        assert_eq!(dto.sender, "bob");
        assert_eq!(dto.body, "hi");
        assert_eq!(dto.timestamp, "[2024-05-01 09:31]");
        assert_eq!(dto.kind, RecordKindDto::Text);
    }

    #[test]
    fn test_record_without_kind_defaults_to_text() {
        // テスト項目: kind のない JSON はテキストとして読み込まれる
        // given (前提条件):
        let json = r#"{"sender":"alice","body":"hi","timestamp":"[2024-05-01 09:30]"}"#;

        // when (操作):
        let dto: ChatRecordDto = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(dto.kind, RecordKindDto::Text);
    }

    #[test]
    fn test_domain_participant_to_dto() {
        // テスト項目: 参加者が HTTP 用の DTO に変換される
        // given (前提条件):
        let connected_at = jst_offset().with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let participant = Participant::new(
            ConnectionToken::generate(),
            DisplayName::new("alice"),
            connected_at,
        );

        // when (操作):
        let dto: ParticipantDto = participant.into();

        // then (期待する結果):
        assert_eq!(dto.name, "alice");
        assert_eq!(dto.connected_at, "2024-05-01T09:30:00+09:00");
    }
}
