//! Ports - 外部チェーンランタイムとの境界
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! チェーンのノードは外部から与えられる不透明なサービスで、
//! この crate は trait 越しにしか触れません。
//!
//! # 構成
//! - TaskSource: タスクの全件スナップショット
//! - TaskCommands: 作成・割り当て・状態変更・投票・評価・通知既読
//! - EventSubscription: イベントカテゴリ単位の購読
//! - Clock: 時刻

pub mod clock;
pub mod events;
pub mod task_commands;
pub mod task_source;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::events::{EventHandler, EventSubscription, SubscriptionHandle};
pub use self::task_commands::{TaskCommands, TaskDraft};
pub use self::task_source::TaskSource;
