//! State - タスクの状態と優先度
//!
//! 状態遷移そのものは外部チェーンランタイムが管理します。
//! 検索エンジンは `TaskStatus` を不透明な値として扱い、遷移を検証しません。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::SearchError;

/// TaskStatus はタスクの状態を表現
///
/// # 状態遷移（ランタイム側）
/// ```text
/// Pending → InProgress → Completed
///                      → PendingVerification → Completed
///                                            → InProgress
///                      → Cancelled
/// ```
/// ランタイムは Pending からの遷移を全て許可します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    PendingVerification,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
        TaskStatus::PendingVerification,
    ];

    /// ランタイムのストレージで使われる数値コード
    pub const fn code(self) -> u8 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Cancelled => 3,
            TaskStatus::PendingVerification => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
            TaskStatus::PendingVerification => "PendingVerification",
        }
    }

    /// Completed と Cancelled は終端状態
    pub fn is_final(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }

    /// ランタイムが許可する次の状態
    ///
    /// 検索エンジンはこの表を参照しません（InMemoryChain のみが使用）。
    pub const fn allowed_next_states(self) -> &'static [TaskStatus] {
        match self {
            TaskStatus::Pending => &[
                TaskStatus::InProgress,
                TaskStatus::Completed,
                TaskStatus::Cancelled,
                TaskStatus::PendingVerification,
            ],
            TaskStatus::InProgress => &[
                TaskStatus::Completed,
                TaskStatus::Cancelled,
                TaskStatus::PendingVerification,
            ],
            TaskStatus::PendingVerification => &[TaskStatus::Completed, TaskStatus::InProgress],
            TaskStatus::Completed | TaskStatus::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        self.allowed_next_states().contains(&next)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = SearchError;

    /// "InProgress" / "in_progress" / "in-progress" のどれでも受け付ける
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "inprogress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" | "canceled" => Ok(TaskStatus::Cancelled),
            "pendingverification" => Ok(TaskStatus::PendingVerification),
            _ => Err(SearchError::invalid(
                "status",
                format!("unknown status '{s}'"),
            )),
        }
    }
}

/// TaskPriority はタスクの優先度
///
/// 並び順（Ord）は序数 Low=1 < Medium=2 < High=3 < Urgent=4 と一致します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    /// Sort ordinal (also the runtime's storage code).
    pub const fn ordinal(self) -> u8 {
        match self {
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
            TaskPriority::Urgent => 4,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.ordinal() == ordinal)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            _ => Err(SearchError::invalid(
                "priority",
                format!("unknown priority '{s}'"),
            )),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::canonical("InProgress", TaskStatus::InProgress)]
    #[case::snake("in_progress", TaskStatus::InProgress)]
    #[case::kebab("pending-verification", TaskStatus::PendingVerification)]
    #[case::american("canceled", TaskStatus::Cancelled)]
    #[case::padded("  Completed ", TaskStatus::Completed)]
    fn status_parses_loosely(#[case] input: &str, #[case] expected: TaskStatus) {
        assert_eq!(input.parse::<TaskStatus>().unwrap(), expected);
    }

    #[test]
    fn unknown_status_is_invalid_argument() {
        let err = "archived".parse::<TaskStatus>().unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidArgument { field: "status", .. }
        ));
    }

    #[test]
    fn status_codes_round_trip() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(TaskStatus::from_code(5), None);
    }

    #[test]
    fn final_states_have_no_successors() {
        for status in TaskStatus::ALL {
            assert_eq!(status.is_final(), status.allowed_next_states().is_empty());
        }
    }

    #[rstest]
    #[case(TaskStatus::InProgress, TaskStatus::PendingVerification, true)]
    #[case(TaskStatus::PendingVerification, TaskStatus::InProgress, true)]
    #[case(TaskStatus::PendingVerification, TaskStatus::Cancelled, false)]
    #[case(TaskStatus::Completed, TaskStatus::InProgress, false)]
    fn transitions_follow_runtime_table(
        #[case] from: TaskStatus,
        #[case] to: TaskStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn priority_order_matches_ordinal() {
        let mut sorted = TaskPriority::ALL;
        sorted.sort();
        assert_eq!(sorted, TaskPriority::ALL);
        assert_eq!(TaskPriority::Urgent.ordinal(), 4);
        assert_eq!(TaskPriority::from_ordinal(0), None);
        assert_eq!("URGENT".parse::<TaskPriority>().unwrap(), TaskPriority::Urgent);
    }
}
