//! TaskSearchService - スナップショット取得 + 検索
//!
//! 呼び出しごとに TaskSource から全件を取得し、純粋関数の search に渡します。
//! キャッシュは持ちません（一覧画面と同じく毎回取り直す）。

use std::sync::Arc;

use crate::config::SearchConfig;
use crate::domain::{AppError, ChainError, SearchFilters, SearchRequest, Task};
use crate::observability::TaskStatistics;
use crate::ports::{Clock, TaskSource};
use crate::present::SearchResultsView;
use crate::search::{self, SearchPage};

pub struct TaskSearchService {
    source: Arc<dyn TaskSource>,
    clock: Arc<dyn Clock>,
    settings: SearchConfig,
}

impl TaskSearchService {
    pub fn new(
        source: Arc<dyn TaskSource>,
        clock: Arc<dyn Clock>,
        settings: SearchConfig,
    ) -> Self {
        Self {
            source,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &SearchConfig {
        &self.settings
    }

    /// 設定のページサイズを使った 1 ページ目のリクエスト
    pub fn request(&self, filters: SearchFilters) -> SearchRequest {
        SearchRequest::new(filters).page(1, self.settings.default_page_size)
    }

    /// 不正なページ指定はスナップショットを取得する前に弾く
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage, AppError> {
        request.validate()?;
        let tasks = self.snapshot().await?;
        let page = search::search(&tasks, request)?;
        tracing::info!(
            total = page.total,
            page = page.page,
            returned = page.items.len(),
            sort_by = %request.sort_by,
            "search completed"
        );
        Ok(page)
    }

    pub async fn quick_search(&self, keyword: &str) -> Result<Vec<Task>, AppError> {
        if keyword.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tasks = self.snapshot().await?;
        let found = search::quick_search(&tasks, keyword, self.settings.quick_search_limit);
        tracing::info!(keyword, found = found.len(), "quick search completed");
        Ok(found)
    }

    pub async fn statistics(&self) -> Result<TaskStatistics, AppError> {
        let tasks = self.snapshot().await?;
        Ok(TaskStatistics::from_tasks(&tasks, self.clock.now()))
    }

    /// 設定のプレビュー文字数でビューモデルを作る
    pub fn results_view<'a>(&self, page: &'a SearchPage, keyword: &str) -> SearchResultsView<'a> {
        SearchResultsView::new(page, keyword, self.settings.description_preview_chars)
    }

    async fn snapshot(&self) -> Result<Vec<Task>, ChainError> {
        self.source.list_tasks().await.inspect_err(|err| {
            tracing::warn!(kind = ?err.kind(), error = %err, "failed to fetch task snapshot");
        })
    }
}
