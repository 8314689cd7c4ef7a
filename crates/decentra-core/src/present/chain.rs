//! Raw chain record decoding
//!
//! ランタイムのストレージ `tasks.tasks` を列挙すると `(key, value)` の組が返ります。
//! key がタスク id、value がレコードの JSON です。
//!
//! # 許容する表現
//! - フィールド名: snake_case / camelCase の両方
//! - title / description: 文字列、または `0x` で始まる UTF-8 バイト列の hex
//! - status / priority: 名前（`"InProgress"`）または数値コード
//! - reward: 数値、または 10 進 / `0x` hex の文字列
//! - タイムスタンプ: epoch ミリ秒
//!
//! 未知のコードはエラーにします（黙って Pending / Medium に倒さない）。

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{AccountId, Balance, Difficulty, Task, TaskId, TaskPriority, TaskStatus};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed task record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("task id must be positive, got {0}")]
    InvalidId(u32),

    #[error("unknown task status: {0}")]
    UnknownStatus(String),

    #[error("unknown task priority: {0}")]
    UnknownPriority(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl DecodeError {
    fn field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CodeOrName {
    Code(u64),
    Name(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Amount {
    Number(u64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawTask {
    title: String,
    #[serde(default)]
    description: String,
    creator: String,
    #[serde(default)]
    assignee: Option<String>,
    status: CodeOrName,
    priority: CodeOrName,
    difficulty: u8,
    reward: Amount,
    #[serde(default)]
    deadline: Option<i64>,
    #[serde(alias = "createdAt")]
    created_at: i64,
    #[serde(alias = "updatedAt")]
    updated_at: i64,
}

/// `(key, value)` を Task に変換
pub fn decode_task(key: u32, value: &Value) -> Result<Task, DecodeError> {
    let id = TaskId::new(key).map_err(|_| DecodeError::InvalidId(key))?;
    let raw = RawTask::deserialize(value)?;

    let difficulty = Difficulty::new(raw.difficulty)
        .map_err(|err| DecodeError::field("difficulty", err.to_string()))?;
    let created_at = millis("created_at", raw.created_at)?;
    let updated_at = millis("updated_at", raw.updated_at)?;
    let deadline = raw
        .deadline
        .map(|ms| millis("deadline", ms))
        .transpose()?;

    let title = text("title", &raw.title)?;
    let mut task = Task::new(id, title, AccountId::new(raw.creator), created_at)
        .with_description(text("description", &raw.description)?)
        .with_status(status(raw.status)?)
        .with_priority(priority(raw.priority)?)
        .with_difficulty(difficulty)
        .with_reward(amount(raw.reward)?)
        .with_updated_at(updated_at);
    task.deadline = deadline;
    task.assignee = raw.assignee.map(AccountId::new);
    Ok(task)
}

/// ストレージ列挙の結果をまとめて変換（1 件でも壊れていれば失敗）
pub fn decode_entries<'a, I>(entries: I) -> Result<Vec<Task>, DecodeError>
where
    I: IntoIterator<Item = (u32, &'a Value)>,
{
    entries
        .into_iter()
        .map(|(key, value)| decode_task(key, value))
        .collect()
}

fn status(raw: CodeOrName) -> Result<TaskStatus, DecodeError> {
    match raw {
        CodeOrName::Code(code) => u8::try_from(code)
            .ok()
            .and_then(TaskStatus::from_code)
            .ok_or_else(|| DecodeError::UnknownStatus(code.to_string())),
        CodeOrName::Name(name) => name
            .parse()
            .map_err(|_| DecodeError::UnknownStatus(name)),
    }
}

fn priority(raw: CodeOrName) -> Result<TaskPriority, DecodeError> {
    match raw {
        CodeOrName::Code(code) => u8::try_from(code)
            .ok()
            .and_then(TaskPriority::from_ordinal)
            .ok_or_else(|| DecodeError::UnknownPriority(code.to_string())),
        CodeOrName::Name(name) => name
            .parse()
            .map_err(|_| DecodeError::UnknownPriority(name)),
    }
}

fn amount(raw: Amount) -> Result<Balance, DecodeError> {
    match raw {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => {
            let parsed = match s.strip_prefix("0x") {
                Some(hex) => u128::from_str_radix(hex, 16),
                None => s.parse::<u128>(),
            };
            let value = parsed.map_err(|err| DecodeError::field("reward", err.to_string()))?;
            Balance::try_from(value)
                .map_err(|_| DecodeError::field("reward", format!("{value} does not fit in u64")))
        }
    }
}

fn millis(field: &'static str, ms: i64) -> Result<DateTime<Utc>, DecodeError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| DecodeError::field(field, format!("timestamp out of range: {ms}")))
}

/// BoundedVec<u8> は toJSON で `0x...` の hex になる
fn text(field: &'static str, raw: &str) -> Result<String, DecodeError> {
    let Some(hex) = raw.strip_prefix("0x") else {
        return Ok(raw.to_string());
    };
    if hex.len() % 2 != 0 {
        return Err(DecodeError::field(field, "odd-length hex string"));
    }
    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| DecodeError::field(field, format!("bad hex at offset {i}")))
        })
        .collect::<Result<Vec<u8>, _>>()?;
    String::from_utf8(bytes).map_err(|err| DecodeError::field(field, err.to_string()))
}
