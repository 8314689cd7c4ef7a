//! App - アプリケーション層
//!
//! このモジュールは、ports と検索エンジンを組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **AppBuilder**: アプリケーションの構築とワイヤリング
//! - **TaskSearchService**: スナップショット取得 → 検索 / 簡易検索 / 統計
//! - **Session**: ウォレット接続コンテキスト（明示的に渡す）
//! - **watch_notifications**: 選択中アカウント宛ての通知購読

pub mod builder;
pub mod notifications;
pub mod service;
pub mod session;

// 主要な型を再エクスポート
pub use self::builder::{App, AppBuilder, BuildError};
pub use self::notifications::watch_notifications;
pub use self::service::TaskSearchService;
pub use self::session::Session;
