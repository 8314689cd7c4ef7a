//! Events - ランタイムから届くイベント
//!
//! ランタイムのイベントをデコード済みの値として扱います。
//! 購読は `EventCategory` 単位で行います（ports::EventSubscription）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, NotificationId, TaskId};
use super::reputation::ReputationLevel;
use super::state::TaskStatus;

/// EventCategory は購読の単位（ランタイムの pallet にほぼ対応）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Tasks,
    Verification,
    Achievements,
    Reputation,
    Notifications,
}

/// ChainEvent はデコード済みのランタイムイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChainEvent {
    TaskCreated {
        task_id: TaskId,
        creator: AccountId,
        title: String,
    },
    TaskAssigned {
        task_id: TaskId,
        assignee: AccountId,
    },
    TaskStatusChanged {
        task_id: TaskId,
        old_status: TaskStatus,
        new_status: TaskStatus,
    },
    VerificationVoteSubmitted {
        task_id: TaskId,
        voter: AccountId,
        approve: bool,
    },
    TaskEvaluated {
        task_id: TaskId,
        evaluator: AccountId,
        rating: u8,
    },
    AchievementUnlocked {
        account: AccountId,
        achievement: String,
    },
    ReputationChanged {
        account: AccountId,
        task_id: TaskId,
        old_score: u32,
        new_score: u32,
    },
    ReputationLevelUp {
        account: AccountId,
        old_level: ReputationLevel,
        new_level: ReputationLevel,
    },
    NotificationCreated {
        recipient: AccountId,
        notification_id: NotificationId,
    },
    RealtimeNotificationPushed {
        recipient: AccountId,
        kind: NotificationKind,
    },
}

impl ChainEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            ChainEvent::TaskCreated { .. }
            | ChainEvent::TaskAssigned { .. }
            | ChainEvent::TaskStatusChanged { .. }
            | ChainEvent::TaskEvaluated { .. } => EventCategory::Tasks,
            ChainEvent::VerificationVoteSubmitted { .. } => EventCategory::Verification,
            ChainEvent::AchievementUnlocked { .. } => EventCategory::Achievements,
            ChainEvent::ReputationChanged { .. } | ChainEvent::ReputationLevelUp { .. } => {
                EventCategory::Reputation
            }
            ChainEvent::NotificationCreated { .. }
            | ChainEvent::RealtimeNotificationPushed { .. } => EventCategory::Notifications,
        }
    }

    /// 通知系イベントの宛先
    pub fn recipient(&self) -> Option<&AccountId> {
        match self {
            ChainEvent::NotificationCreated { recipient, .. }
            | ChainEvent::RealtimeNotificationPushed { recipient, .. } => Some(recipient),
            ChainEvent::AchievementUnlocked { account, .. }
            | ChainEvent::ReputationChanged { account, .. }
            | ChainEvent::ReputationLevelUp { account, .. } => Some(account),
            _ => None,
        }
    }
}

/// NotificationKind は通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TaskAssigned,
    TaskStatusChanged,
    VerificationRequested,
    AchievementUnlocked,
    ReputationLevelUp,
}

/// Notification はランタイムが保存する通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: AccountId,
    pub kind: NotificationKind,
    pub task_id: Option<TaskId>,
    pub message: String,
    pub read: bool,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}
