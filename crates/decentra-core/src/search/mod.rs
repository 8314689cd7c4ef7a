//! Search - クライアント側のタスク検索エンジン
//!
//! バックエンドに検索エンドポイントが無いため、
//! メモリ上のスナップショットに対して毎回フルに実行します（インデックスなし）。
//!
//! # パイプライン
//! 1. filter: 条件の AND で絞り込み（元の順序を保持）
//! 2. sort: キーと方向で並べ替え（同値は id 昇順）
//! 3. paginate: 1 始まりのページを切り出し、総件数と一緒に返す
//!
//! すべて純粋関数です。入力のスナップショットは借用するだけで変更せず、
//! 返すページ分だけを clone します。

mod filter;
mod matcher;
mod paginate;
mod sort;

pub use filter::{filter_tasks, matches};
pub use matcher::{Needle, contains_ignore_case};
pub use paginate::{SearchPage, paginate, total_pages};
pub use sort::{compare, sort_tasks, sort_value};

use crate::domain::{SearchError, SearchFilters, SearchRequest, SortKey, Task};

pub const DEFAULT_QUICK_SEARCH_LIMIT: usize = 8;

/// filter → sort → paginate を 1 回実行
///
/// ページ指定が不正なら、何も計算せずに InvalidArgument を返します。
pub fn search(tasks: &[Task], request: &SearchRequest) -> Result<SearchPage, SearchError> {
    request.validate()?;

    let mut matched = filter_tasks(tasks, &request.filters);
    tracing::debug!(
        snapshot = tasks.len(),
        matched = matched.len(),
        "filtered task snapshot"
    );

    sort_tasks(&mut matched, request.sort_by, request.sort_desc);
    paginate(&matched, request.page, request.page_size)
}

/// キーワードだけの簡易検索（検索ウィジェット用）
///
/// 前後の空白を除いたキーワードが空なら何も返しません。
/// 並び順は既定（created_at 降順）で、先頭 `limit` 件だけ返します。
pub fn quick_search(tasks: &[Task], keyword: &str, limit: usize) -> Vec<Task> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Vec::new();
    }

    let filters = SearchFilters::new().keyword(keyword);
    let mut matched = filter_tasks(tasks, &filters);
    sort_tasks(&mut matched, SortKey::default(), true);
    matched.into_iter().take(limit).cloned().collect()
}
