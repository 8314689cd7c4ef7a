//! Task board statistics (dashboard counters).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Balance, Task, TaskPriority, TaskStatus};

/// ダッシュボードの報酬区間（下限, 上限）。最後の区間は上限なし。
pub const REWARD_BUCKETS: [(Balance, Option<Balance>); 4] =
    [(0, Some(100)), (101, Some(500)), (501, Some(1000)), (1001, None)];

/// RewardBucket は報酬区間ごとの件数と合計
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardBucket {
    pub min: Balance,
    pub max: Option<Balance>,
    pub count: usize,
    pub total_reward: Balance,
}

impl RewardBucket {
    fn empty((min, max): (Balance, Option<Balance>)) -> Self {
        Self {
            min,
            max,
            count: 0,
            total_reward: 0,
        }
    }

    pub fn contains(&self, reward: Balance) -> bool {
        reward >= self.min && self.max.is_none_or(|max| reward <= max)
    }

    /// "101-500" / "1001+"
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("{}-{max}", self.min),
            None => format!("{}+", self.min),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatistics {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub pending_verification: usize,
    pub by_priority: BTreeMap<TaskPriority, usize>,
    /// 難易度 1〜10 ごとの件数（0 件の難易度は含まない）
    pub by_difficulty: BTreeMap<u8, usize>,
    pub reward_buckets: Vec<RewardBucket>,
    pub total_reward: Balance,
    /// 0.0 for an empty snapshot.
    pub average_difficulty: f64,
    /// Not final and past the deadline.
    pub overdue: usize,
}

impl TaskStatistics {
    pub fn from_tasks(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let mut stats = TaskStatistics {
            total: tasks.len(),
            reward_buckets: REWARD_BUCKETS.into_iter().map(RewardBucket::empty).collect(),
            ..Default::default()
        };
        let mut difficulty_sum: u64 = 0;

        for task in tasks {
            match task.status {
                TaskStatus::Pending => stats.pending += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Completed => stats.completed += 1,
                TaskStatus::Cancelled => stats.cancelled += 1,
                TaskStatus::PendingVerification => stats.pending_verification += 1,
            }
            *stats.by_priority.entry(task.priority).or_default() += 1;
            *stats.by_difficulty.entry(task.difficulty.get()).or_default() += 1;
            if let Some(bucket) = stats
                .reward_buckets
                .iter_mut()
                .find(|bucket| bucket.contains(task.reward))
            {
                bucket.count += 1;
                bucket.total_reward = bucket.total_reward.saturating_add(task.reward);
            }
            stats.total_reward = stats.total_reward.saturating_add(task.reward);
            difficulty_sum += u64::from(task.difficulty.get());
            if !task.is_final() && task.is_expired(now) {
                stats.overdue += 1;
            }
        }

        if !tasks.is_empty() {
            stats.average_difficulty = difficulty_sum as f64 / tasks.len() as f64;
        }
        stats
    }

    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
            TaskStatus::Cancelled => self.cancelled,
            TaskStatus::PendingVerification => self.pending_verification,
        }
    }

    /// Completed share of all tasks, in percent.
    pub fn completion_rate(&self) -> f64 {
        self.percentage(self.completed)
    }

    /// `count` as a percentage of all tasks (0.0 for an empty snapshot).
    pub fn percentage(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.total as f64
        }
    }
}
