//! Impls - ポートの実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryChain**: TaskSource / TaskCommands / EventSubscription をメモリ上で実装
//!
//! 本物のノードへの接続（WebSocket RPC）はこの crate の外側で実装します。

pub mod inmem_chain;

pub use self::inmem_chain::{Evaluation, InMemoryChain, VERIFICATION_QUORUM};
