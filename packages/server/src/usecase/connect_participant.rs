//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 定員チェックと履歴のリプレイ
//!
//! ### なぜこのテストが必要か
//! - ルームは最大 2 人で、3 人目は拒否されなければならない
//! - 参加者は参加時点までの履歴を、ライブ配信と同じ表示形式で受け取る
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの参加、履歴のある状態での参加
//! - 異常系：満員のルームへの参加
//! - エッジケース：自分の過去の発言は "You" で表示される

use std::sync::Arc;

use futari_shared::time::Clock;

use crate::domain::{ConnectionToken, DisplayName, PusherChannel};

use super::{error::ConnectError, history_log::HistoryLog, room_registry::RoomRegistry};

/// 参加の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub token: ConnectionToken,
    /// リプレイしたレコード数
    pub replayed: usize,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    registry: Arc<RoomRegistry>,
    history: Arc<HistoryLog>,
    clock: Arc<dyn Clock>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(registry: Arc<RoomRegistry>, history: Arc<HistoryLog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            history,
            clock,
        }
    }

    /// 参加者接続を実行
    ///
    /// 参加に成功した場合、その時点の履歴を全て新しい接続に送信する。
    /// 参加とリプレイは履歴のロックを保持したまま行うため、
    /// 同時に追加されたメッセージが欠けたり二重に届いたりすることはない。
    ///
    /// # Arguments
    ///
    /// * `name` - 参加者の表示名
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Admission)` - 参加成功
    /// * `Err(ConnectError)` - 満員
    pub async fn execute(
        &self,
        name: DisplayName,
        sender: PusherChannel,
    ) -> Result<Admission, ConnectError> {
        // 1. 履歴をロック（リプレイが終わるまで新しいメッセージは追加されない）
        let log = self.history.lock().await;

        // 2. 定員チェックと登録
        let token = self
            .registry
            .try_admit(name.clone(), sender, self.clock.now())
            .await?;

        // 3. 履歴のリプレイ
        let mut replayed = 0;
        for record in log.records() {
            if let Err(e) = self.registry.push_to(&token, &record.render_for(&name)).await {
                tracing::warn!("Stopped replaying history to '{}': {}", name, e);
                break;
            }
            replayed += 1;
        }

        tracing::info!(
            "'{}' admitted as {} ({} records replayed)",
            name,
            token,
            replayed
        );
        Ok(Admission { token, replayed })
    }
}
