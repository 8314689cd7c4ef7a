//! decentra-core
//!
//! Client-side task search engine for the decentra task board.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, task, state, filters, events, errors）
//! - **search**: 検索エンジン（filter → sort → paginate、簡易検索）
//! - **present**: 画面用の変換（ラベル・色、ハイライト、ビューモデル、生レコードのデコード）
//! - **ports**: 外部チェーンランタイムとの境界（TaskSource, TaskCommands, EventSubscription, Clock）
//! - **impls**: 実装（InMemoryChain など開発用）
//! - **app**: アプリケーション層（builder, service, session, notifications）
//! - **observability**: ダッシュボード用の統計
//! - **config**: figment による設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
pub mod present;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;
