//! TaskCommands port - ランタイムへのトランザクション
//!
//! 署名はウォレット側の責務です。ここでは署名者の AccountId だけを受け取ります。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AccountId, Balance, ChainError, Difficulty, Notification, NotificationId, TaskId,
    TaskPriority, TaskStatus, UserReputation,
};

/// TaskDraft は create_task の入力
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub reward: Balance,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub deadline: Option<DateTime<Utc>>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: TaskPriority::default(),
            difficulty: Difficulty::default(),
            reward: 0,
            deadline: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn reward(mut self, reward: Balance) -> Self {
        self.reward = reward;
        self
    }

    pub fn deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// TaskCommands はランタイムの dispatchable をまとめたもの
///
/// 権限や状態遷移の検証はランタイム側で行われ、拒否は ChainError で返ります。
#[async_trait::async_trait]
pub trait TaskCommands: Send + Sync {
    async fn create_task(&self, signer: &AccountId, draft: TaskDraft)
    -> Result<TaskId, ChainError>;

    async fn assign_task(
        &self,
        signer: &AccountId,
        task_id: TaskId,
        assignee: AccountId,
    ) -> Result<(), ChainError>;

    async fn change_task_status(
        &self,
        signer: &AccountId,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<(), ChainError>;

    async fn submit_verification_vote(
        &self,
        signer: &AccountId,
        task_id: TaskId,
        approve: bool,
    ) -> Result<(), ChainError>;

    /// rating は 1〜5
    async fn evaluate_task(
        &self,
        signer: &AccountId,
        task_id: TaskId,
        rating: u8,
        comment: String,
    ) -> Result<(), ChainError>;

    async fn mark_notification_read(
        &self,
        signer: &AccountId,
        notification_id: NotificationId,
    ) -> Result<(), ChainError>;

    /// 新しい順
    async fn notifications_for(&self, account: &AccountId)
    -> Result<Vec<Notification>, ChainError>;

    /// 評価・完了・キャンセルを集計した評判（記録がなければ初期値）
    async fn reputation_of(&self, account: &AccountId) -> Result<UserReputation, ChainError>;
}
