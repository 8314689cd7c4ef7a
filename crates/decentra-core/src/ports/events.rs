//! EventSubscription port - ランタイムイベントの購読
//!
//! 配送方式（WebSocket の push、ポーリングなど）は実装側が決めます。
//! 購読者はカテゴリとハンドラを渡し、キャンセル用のハンドルを受け取ります。

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::domain::{ChainError, ChainEvent, EventCategory};

/// デコード済みイベントを受け取るコールバック
pub type EventHandler = Arc<dyn Fn(ChainEvent) + Send + Sync>;

/// SubscriptionHandle は購読 1 件分の配送タスク
///
/// cancel するか drop すると配送が止まります。
#[derive(Debug)]
pub struct SubscriptionHandle {
    category: EventCategory,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    pub fn new(category: EventCategory, task: JoinHandle<()>) -> Self {
        Self { category, task }
    }

    pub fn category(&self) -> EventCategory {
        self.category
    }

    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn cancel(self) {
        // Drop が abort する
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[async_trait::async_trait]
pub trait EventSubscription: Send + Sync {
    async fn subscribe(
        &self,
        category: EventCategory,
        handler: EventHandler,
    ) -> Result<SubscriptionHandle, ChainError>;
}
