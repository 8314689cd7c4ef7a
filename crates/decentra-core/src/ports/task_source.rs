//! TaskSource port - タスクスナップショットの取得
//!
//! ランタイムには検索エンドポイントが無いので、毎回全件を取得して
//! クライアント側で検索します。

use crate::domain::{ChainError, Task};

/// TaskSource はチェーン上の全タスクを返す
#[async_trait::async_trait]
pub trait TaskSource: Send + Sync {
    /// 全件のスナップショット（順序はストレージの列挙順）
    async fn list_tasks(&self) -> Result<Vec<Task>, ChainError>;
}
