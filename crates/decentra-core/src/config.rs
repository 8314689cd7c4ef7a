//! Config - figment による階層的な設定
//!
//! 優先順位（後ろほど強い）:
//! 1. 組み込みの既定値
//! 2. `decentra.toml`（カレントディレクトリ、または明示したパス）
//! 3. 環境変数 `DECENTRA_*`（`__` でセクションを区切る）
//!
//! 例: `DECENTRA_SEARCH__DEFAULT_PAGE_SIZE=25` → `search.default_page_size`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::DEFAULT_PAGE_SIZE;
use crate::present::DEFAULT_PREVIEW_CHARS;
use crate::search::DEFAULT_QUICK_SEARCH_LIMIT;

pub const CONFIG_FILE: &str = "decentra.toml";
pub const ENV_PREFIX: &str = "DECENTRA_";
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9944";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// ノードの WebSocket RPC エンドポイント
    pub endpoint: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_page_size: u32,
    pub quick_search_limit: usize,
    pub description_preview_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            quick_search_limit: DEFAULT_QUICK_SEARCH_LIMIT,
            description_preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// EnvFilter の書式（"warn", "decentra_core=debug" など）
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 既定値 + `./decentra.toml`（あれば）+ 環境変数
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment(None))
    }

    /// 既定値 + 指定した TOML + 環境変数
    ///
    /// 明示されたファイルが存在しなければエラーにします。
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::InvalidValue {
                field: "config",
                reason: format!("{} does not exist", path.display()),
            });
        }
        Self::from_figment(Self::figment(Some(path.to_path_buf())))
    }

    /// provider の連鎖を組み立てる（テストで直接 extract できるよう公開）
    pub fn figment(file: Option<PathBuf>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = file.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }

        // DECENTRA_LOG はログフィルタ用（CLI が直接読む）
        figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["log"]).split("__"))
    }

    fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.default_page_size",
                reason: "must be positive".into(),
            });
        }
        if self.search.quick_search_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.quick_search_limit",
                reason: "must be positive".into(),
            });
        }
        if self.chain.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "chain.endpoint",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
