//! SearchFilters / SearchRequest - 1 回の検索呼び出しのためのリクエスト値
//!
//! 永続化はしません。呼び出し側が検索 1 回分だけ所有します。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::SearchError;
use super::state::{TaskPriority, TaskStatus};
use super::task::Balance;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// ValueRange は両端を含む範囲 [min, max]
///
/// min > max の範囲もそのまま受け付けます（どの値にもマッチしないだけ）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> ValueRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: &T) -> bool {
        *value >= self.min && *value <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// SearchFilters は絞り込み条件（すべて AND）
///
/// 未指定（None / false / 空文字列）のフィールドは条件になりません。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// title または description の部分一致（大文字小文字を区別しない）
    pub keyword: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub difficulty_range: Option<ValueRange<u8>>,
    pub reward_range: Option<ValueRange<Balance>>,
    /// creator の部分一致
    pub creator: Option<String>,
    /// assignee の部分一致（未割り当てのタスクはマッチしない）
    pub assignee: Option<String>,
    /// 期限がこの範囲内のタスク（期限なしはマッチしない）
    pub deadline_range: Option<ValueRange<DateTime<Utc>>>,
    pub created_range: Option<ValueRange<DateTime<Utc>>>,
    pub unassigned_only: bool,
    pub has_deadline: bool,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn difficulty_range(mut self, min: u8, max: u8) -> Self {
        self.difficulty_range = Some(ValueRange::new(min, max));
        self
    }

    pub fn reward_range(mut self, min: Balance, max: Balance) -> Self {
        self.reward_range = Some(ValueRange::new(min, max));
        self
    }

    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn deadline_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.deadline_range = Some(ValueRange::new(start, end));
        self
    }

    pub fn created_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.created_range = Some(ValueRange::new(start, end));
        self
    }

    pub fn unassigned_only(mut self) -> Self {
        self.unassigned_only = true;
        self
    }

    pub fn has_deadline(mut self) -> Self {
        self.has_deadline = true;
        self
    }
}

/// SortKey は並べ替えのキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    Deadline,
    Reward,
    Difficulty,
    Priority,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::CreatedAt,
        SortKey::UpdatedAt,
        SortKey::Deadline,
        SortKey::Reward,
        SortKey::Difficulty,
        SortKey::Priority,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::UpdatedAt => "updated_at",
            SortKey::Deadline => "deadline",
            SortKey::Reward => "reward",
            SortKey::Difficulty => "difficulty",
            SortKey::Priority => "priority",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                SearchError::invalid(
                    "sort_by",
                    format!(
                        "unknown sort key '{s}', expected one of created_at, updated_at, \
                         deadline, reward, difficulty, priority"
                    ),
                )
            })
    }
}

/// SearchRequest は絞り込み + 並べ替え + ページ指定
///
/// 既定値: created_at の降順、1 ページ目、10 件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    #[serde(flatten)]
    pub filters: SearchFilters,
    pub sort_by: SortKey,
    pub sort_desc: bool,
    /// 1 始まり
    pub page: u32,
    pub page_size: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            filters: SearchFilters::default(),
            sort_by: SortKey::CreatedAt,
            sort_desc: true,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchRequest {
    pub fn new(filters: SearchFilters) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, key: SortKey, descending: bool) -> Self {
        self.sort_by = key;
        self.sort_desc = descending;
        self
    }

    pub fn page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// ページ指定を検証（部分的な結果を返す前に失敗させる）
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.page_size == 0 {
            return Err(SearchError::invalid("page_size", "must be positive, got 0"));
        }
        if self.page == 0 {
            return Err(SearchError::invalid("page", "pages are 1-indexed, got 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn range_is_inclusive_at_both_ends() {
        let range = ValueRange::new(3u8, 5u8);
        assert!(range.contains(&3));
        assert!(range.contains(&5));
        assert!(!range.contains(&6));
        assert!(!range.is_inverted());
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let range = ValueRange::new(7u8, 2u8);
        assert!(range.is_inverted());
        assert!((0..=u8::MAX).all(|v| !range.contains(&v)));
    }

    #[rstest]
    #[case("created_at", SortKey::CreatedAt)]
    #[case("UPDATED_AT", SortKey::UpdatedAt)]
    #[case(" reward ", SortKey::Reward)]
    #[case("priority", SortKey::Priority)]
    fn sort_key_parses(#[case] input: &str, #[case] expected: SortKey) {
        assert_eq!(input.parse::<SortKey>().unwrap(), expected);
    }

    #[test]
    fn unknown_sort_key_is_invalid_argument() {
        let err = "title".parse::<SortKey>().unwrap_err();
        assert!(matches!(
            err,
            SearchError::InvalidArgument { field: "sort_by", .. }
        ));
    }

    #[test]
    fn default_request_sorts_newest_first() {
        let request = SearchRequest::default();
        assert_eq!(request.sort_by, SortKey::CreatedAt);
        assert!(request.sort_desc);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, DEFAULT_PAGE_SIZE);
        assert!(request.validate().is_ok());
    }

    #[rstest]
    #[case::zero_page_size(1, 0, "page_size")]
    #[case::zero_page(0, 10, "page")]
    fn validate_rejects_bad_pages(#[case] page: u32, #[case] size: u32, #[case] field: &str) {
        let err = SearchRequest::default().page(page, size).validate().unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument { field: f, .. } if f == field));
    }

    #[test]
    fn request_deserializes_from_flat_json() {
        let request: SearchRequest = serde_json::from_value(serde_json::json!({
            "keyword": "react",
            "unassigned_only": true,
            "sort_by": "reward",
            "sort_desc": false,
            "page_size": 5
        }))
        .unwrap();

        assert_eq!(request.filters.keyword.as_deref(), Some("react"));
        assert!(request.filters.unassigned_only);
        assert_eq!(request.sort_by, SortKey::Reward);
        assert!(!request.sort_desc);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 5);
    }
}
