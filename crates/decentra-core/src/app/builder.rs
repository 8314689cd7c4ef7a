//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - 開発体験の改善（明確なエラーメッセージ）

use std::sync::Arc;

use super::service::TaskSearchService;
use crate::config::{AppConfig, ConfigError};
use crate::ports::{Clock, SystemClock, TaskSource};

/// AppBuilder はアプリケーションを構築
///
/// # 使用例
/// ```ignore
/// let chain = Arc::new(InMemoryChain::from_snapshot(tasks, Arc::new(SystemClock)));
/// let app = AppBuilder::new()
///     .task_source(chain)
///     .config(AppConfig::load()?)
///     .build()?;
/// let page = app.search().search(&SearchRequest::default()).await?;
/// ```
///
/// # Fail-fast 設計
/// - task_source が未設定なら BuildError::MissingTaskSource
/// - 設定値が不正なら BuildError::InvalidConfig
/// - clock と config は省略時に SystemClock / 既定値
pub struct AppBuilder {
    source: Option<Arc<dyn TaskSource>>,
    clock: Option<Arc<dyn Clock>>,
    config: AppConfig,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no task source configured; call AppBuilder::task_source before build")]
    MissingTaskSource,

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            source: None,
            clock: None,
            config: AppConfig::default(),
        }
    }

    pub fn task_source(mut self, source: Arc<dyn TaskSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        let source = self.source.ok_or(BuildError::MissingTaskSource)?;
        self.config.validate()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let search = TaskSearchService::new(source, clock.clone(), self.config.search.clone());
        tracing::debug!(endpoint = %self.config.chain.endpoint, "app built");

        Ok(App {
            config: self.config,
            clock,
            search,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// App は構築済みのサービス群
pub struct App {
    config: AppConfig,
    clock: Arc<dyn Clock>,
    search: TaskSearchService,
}

impl App {
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn search(&self) -> &TaskSearchService {
        &self.search
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SearchRequest;
    use crate::impls::InMemoryChain;
    use crate::ports::FixedClock;
    use crate::testing::{at, sample_tasks};

    fn source() -> Arc<dyn TaskSource> {
        Arc::new(InMemoryChain::from_snapshot(
            sample_tasks(),
            Arc::new(FixedClock::new(at(1, 0))),
        ))
    }

    #[tokio::test]
    async fn test_build_success() {
        let app = AppBuilder::new()
            .task_source(source())
            .clock(Arc::new(FixedClock::new(at(2, 0))))
            .build()
            .unwrap();

        assert_eq!(app.clock().now(), at(2, 0));
        let page = app.search().search(&SearchRequest::default()).await.unwrap();
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_build_missing_task_source() {
        let app = AppBuilder::new().build();
        assert!(matches!(app, Err(BuildError::MissingTaskSource)));
    }

    #[test]
    fn test_build_invalid_config() {
        let mut config = AppConfig::default();
        config.search.quick_search_limit = 0;
        let app = AppBuilder::new().task_source(source()).config(config).build();
        assert!(matches!(
            app,
            Err(BuildError::InvalidConfig(ConfigError::InvalidValue {
                field: "search.quick_search_limit",
                ..
            }))
        ));
    }

    #[test]
    fn test_build_uses_config_page_size() {
        let mut config = AppConfig::default();
        config.search.default_page_size = 3;
        let app = AppBuilder::new()
            .task_source(source())
            .config(config)
            .build()
            .unwrap();
        assert_eq!(app.config().search.default_page_size, 3);
        assert_eq!(app.search().settings().default_page_size, 3);
    }
}
