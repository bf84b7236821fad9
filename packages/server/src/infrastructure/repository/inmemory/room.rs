//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! `Room` ドメインモデルを `Mutex` で保護してインメモリ DB として使用します。
//!
//! 定員チェックと参加者の追加は同じロックの中で行うため、
//! 空きが 1 つのときに同時に 2 つの接続が参加を試みても成功するのは 1 つだけです。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionToken, Participant, RepositoryError, Room, RoomRepository};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// Room ドメインモデル
    room: Arc<Mutex<Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(room: Arc<Mutex<Room>>) -> Self {
        Self { room }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_room(&self) -> Room {
        let room = self.room.lock().await;
        room.clone()
    }

    async fn try_admit(&self, participant: Participant) -> Result<(), RepositoryError> {
        let mut room = self.room.lock().await;
        room.add_participant(participant)?;
        Ok(())
    }

    async fn remove_participant(&self, token: &ConnectionToken) -> Option<Participant> {
        let mut room = self.room.lock().await;
        room.remove_participant(token)
    }

    async fn get_participants(&self) -> Vec<Participant> {
        let room = self.room.lock().await;
        room.participants.clone()
    }

    async fn count_participants(&self) -> usize {
        let room = self.room.lock().await;
        room.participants.len()
    }
}
