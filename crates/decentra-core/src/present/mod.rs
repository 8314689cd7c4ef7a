//! Present - 検索結果とチェーンのレコードを画面用の形に変換
//!
//! # 構成
//! - labels: 状態・優先度のラベルと色（固定の表）
//! - highlight: キーワード一致部分の区切り
//! - view: 一覧行・検索結果ページのビューモデル
//! - chain: ストレージの生レコード → Task

pub mod chain;
pub mod highlight;
pub mod labels;
pub mod view;

pub use chain::{DecodeError, decode_entries, decode_task};
pub use highlight::{Segment, highlight, render_marked};
pub use labels::{
    Badge, TagColor, priority_badge, priority_from_label, status_badge, status_from_label,
};
pub use view::{DEFAULT_PREVIEW_CHARS, SearchResultsView, TaskRowView, difficulty_label, preview};
