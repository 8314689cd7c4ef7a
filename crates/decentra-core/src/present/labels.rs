//! 状態・優先度のラベルと色
//!
//! 値 → ラベルは網羅的な match で決まり、逆引きはその match を全値で引くので、
//! 値 → ラベル → 値 が常に一致します。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{TaskPriority, TaskStatus};

/// TagColor はタグの配色名（UI テーマ側で解決する）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagColor {
    Default,
    Processing,
    Success,
    Error,
    Warning,
    Green,
    Orange,
    Red,
    Magenta,
}

impl TagColor {
    pub const fn as_str(self) -> &'static str {
        match self {
            TagColor::Default => "default",
            TagColor::Processing => "processing",
            TagColor::Success => "success",
            TagColor::Error => "error",
            TagColor::Warning => "warning",
            TagColor::Green => "green",
            TagColor::Orange => "orange",
            TagColor::Red => "red",
            TagColor::Magenta => "magenta",
        }
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge は画面に出すラベルと色の組
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: &'static str,
    pub color: TagColor,
}

pub const fn status_badge(status: TaskStatus) -> Badge {
    let (label, color) = match status {
        TaskStatus::Pending => ("Pending", TagColor::Default),
        TaskStatus::InProgress => ("In Progress", TagColor::Processing),
        TaskStatus::Completed => ("Completed", TagColor::Success),
        TaskStatus::Cancelled => ("Cancelled", TagColor::Error),
        TaskStatus::PendingVerification => ("Pending Verification", TagColor::Warning),
    };
    Badge { label, color }
}

pub const fn priority_badge(priority: TaskPriority) -> Badge {
    let (label, color) = match priority {
        TaskPriority::Low => ("Low", TagColor::Green),
        TaskPriority::Medium => ("Medium", TagColor::Orange),
        TaskPriority::High => ("High", TagColor::Red),
        TaskPriority::Urgent => ("Urgent", TagColor::Magenta),
    };
    Badge { label, color }
}

/// ラベルから状態へ（大文字小文字は無視）
pub fn status_from_label(label: &str) -> Option<TaskStatus> {
    let label = label.trim();
    TaskStatus::ALL
        .into_iter()
        .find(|&status| status_badge(status).label.eq_ignore_ascii_case(label))
}

pub fn priority_from_label(label: &str) -> Option<TaskPriority> {
    let label = label.trim();
    TaskPriority::ALL
        .into_iter()
        .find(|&priority| priority_badge(priority).label.eq_ignore_ascii_case(label))
}
