//! Task - チェーンから取得したタスクのスナップショット
//!
//! この crate はタスクを生成・削除しません。外部ランタイムが返した
//! スナップショットを読み取り、絞り込み・並べ替えを行うだけです。

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::SearchError;
use super::ids::{AccountId, TaskId};
use super::state::{TaskPriority, TaskStatus};

/// 報酬額（チェーンの Balance）
pub type Balance = u64;

/// Difficulty は 1〜10 の難易度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: u8) -> Result<Self, SearchError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SearchError::invalid(
                "difficulty",
                format!("must be within 1..=10, got {value}"),
            ))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = SearchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task はチェーン上の作業単位
///
/// JSON ではタイムスタンプを epoch ミリ秒で表します（ランタイムの Moment と同じ）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub creator: AccountId,
    #[serde(default)]
    pub assignee: Option<AccountId>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub difficulty: Difficulty,
    pub reward: Balance,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Pending / Medium / difficulty 1 / reward 0 のタスクを作成
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        creator: AccountId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            creator,
            assignee: None,
            status: TaskStatus::Pending,
            priority: TaskPriority::default(),
            difficulty: Difficulty::default(),
            reward: 0,
            deadline: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_reward(mut self, reward: Balance) -> Self {
        self.reward = reward;
        self
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_assignee(mut self, assignee: AccountId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// updated_at は created_at より前にならない
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at.max(self.created_at);
        self
    }

    pub fn is_assigned(&self) -> bool {
        self.assignee.is_some()
    }

    pub fn is_final(&self) -> bool {
        self.status.is_final()
    }

    /// 期限が now 以前なら期限切れ（期限なしは常に false）
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= now)
    }

    /// now < deadline <= now + window
    pub fn is_expiring_soon(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.deadline
            .is_some_and(|deadline| deadline > now && deadline <= now + window)
    }
}
