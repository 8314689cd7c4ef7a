//! Domain identifiers (strongly-typed IDs).
//!
//! チェーン側の ID はすべて正の整数（u32）です。
//! `Id<T>` というジェネリック型で共通実装を提供しつつ、
//! `T` は実行時には使わない（PhantomData）マーカー型として、
//! TaskId と NotificationId の混同をコンパイル時に防ぎます。
//!
//! アカウントは SS58 文字列などチェーン依存の表現なので、
//! `AccountId` は不透明な文字列ラッパーにしています。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroU32;

use super::errors::SearchError;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"task-", "notification-"）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// 0 はチェーン上で「未割り当て」を意味するので受け付けません。
/// serde では素の整数として読み書きします。
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Id<T: IdMarker> {
    value: NonZeroU32,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

// derive(Clone, Copy) は T: Clone を要求してしまうので手で書く
impl<T: IdMarker> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: IdMarker> Copy for Id<T> {}

impl<T: IdMarker> Id<T> {
    /// 正の整数から Id を作成
    pub fn new(value: u32) -> Result<Self, SearchError> {
        NonZeroU32::new(value)
            .map(|value| Self {
                value,
                _marker: PhantomData,
            })
            .ok_or_else(|| SearchError::invalid("id", "ids are positive integers, got 0"))
    }

    pub fn get(self) -> u32 {
        self.value.get()
    }
}

impl<T: IdMarker> TryFrom<u32> for Id<T> {
    type Error = SearchError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T: IdMarker> From<Id<T>> for u32 {
    fn from(id: Id<T>) -> Self {
        id.get()
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

// ========================================
// マーカー型の定義
// ========================================

/// Task のマーカー型
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {}

impl IdMarker for Task {
    fn prefix() -> &'static str {
        "task-"
    }
}

/// Notification のマーカー型
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Notification {}

impl IdMarker for Notification {
    fn prefix() -> &'static str {
        "notification-"
    }
}

/// Identifier of a Task (unique within a snapshot).
pub type TaskId = Id<Task>;

/// Identifier of a Notification stored by the runtime.
pub type NotificationId = Id<Notification>;

/// AccountId はチェーン上のアカウント表現（SS58 アドレスや開発用の名前）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
