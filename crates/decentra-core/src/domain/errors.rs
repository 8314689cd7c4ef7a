//! Errors - エラー型と分類
//!
//! 関心ごとにエラー型を分けています。
//! - SearchError: 検索リクエストや値の検証失敗（InvalidArgument）
//! - ChainError: 外部チェーンランタイムの失敗（ErrorKind で運用分類）
//! - SessionError: ウォレット接続コンテキストの誤用
//! - AppError: 上記をまとめたアプリケーション層のエラー
//!
//! 空の検索結果はエラーではありません（items = [] と正しい total を返す）。

use thiserror::Error;

use super::ids::{AccountId, NotificationId, TaskId};
use super::state::TaskStatus;

/// ErrorKind は外部呼び出しエラーの分類
///
/// - Transient: 一時的なエラー（接続断など、再試行に意味がある）
/// - Permanent: 恒久的なエラー（トランザクション拒否など、再試行無意味）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Permanent,
}

/// SearchError は検索エンジンとドメイン値の検証エラー
///
/// 部分的な結果は返さず、同期的にすぐ失敗します。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl SearchError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

/// ChainError は外部チェーンランタイム（またはその代替実装）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("notification not found: {0}")]
    NotificationNotFound(NotificationId),

    #[error("account {account} is not allowed to {action}")]
    NotAuthorized {
        account: AccountId,
        action: &'static str,
    },

    #[error("invalid status transition {from:?} -> {to:?}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },

    #[error("account {account} already voted on {task_id}")]
    AlreadyVoted { task_id: TaskId, account: AccountId },

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("disconnected from chain: {0}")]
    Disconnected(String),
}

impl ChainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChainError::Disconnected(_) => ErrorKind::Transient,
            _ => ErrorKind::Permanent,
        }
    }
}

/// SessionError は Session（接続コンテキスト）の誤用
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("account {0} is not available in this session")]
    UnknownAccount(AccountId),

    #[error("no account selected")]
    NoAccountSelected,
}

/// AppError はアプリケーション層のエラー
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Session(#[from] SessionError),
}
