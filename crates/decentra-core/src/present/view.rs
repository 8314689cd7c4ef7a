//! 一覧画面・検索画面向けのビューモデル
//!
//! ハイライトは元の Task の文字列を借用するので、ビューは結果より長生きできません。

use serde::Serialize;

use super::highlight::{Segment, highlight};
use super::labels::{Badge, priority_badge, status_badge};
use crate::domain::{AccountId, Balance, Difficulty, Task, TaskId};
use crate::search::SearchPage;

pub const DEFAULT_PREVIEW_CHARS: usize = 80;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRowView<'a> {
    pub id: TaskId,
    pub title: Vec<Segment<'a>>,
    pub description: Vec<Segment<'a>>,
    /// true when the description was cut and `...` should follow it.
    pub truncated: bool,
    pub status: Badge,
    pub priority: Badge,
    pub reward: Balance,
    pub difficulty: String,
    pub creator: &'a AccountId,
    pub assignee: Option<&'a AccountId>,
}

impl<'a> TaskRowView<'a> {
    pub fn new(task: &'a Task, keyword: &str, preview_chars: usize) -> Self {
        let (preview, truncated) = preview(&task.description, preview_chars);
        Self {
            id: task.id,
            title: highlight(&task.title, keyword),
            description: highlight(preview, keyword),
            truncated,
            status: status_badge(task.status),
            priority: priority_badge(task.priority),
            reward: task.reward,
            difficulty: difficulty_label(task.difficulty),
            creator: &task.creator,
            assignee: task.assignee.as_ref(),
        }
    }

    /// Description preview as plain text, with the ellipsis when cut.
    pub fn description_text(&self) -> String {
        let mut text: String = self.description.iter().map(|s| s.text).collect();
        if self.truncated {
            text.push_str(ELLIPSIS);
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultsView<'a> {
    pub rows: Vec<TaskRowView<'a>>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: usize,
    pub show_pagination: bool,
}

impl<'a> SearchResultsView<'a> {
    pub fn new(page: &'a SearchPage, keyword: &str, preview_chars: usize) -> Self {
        Self {
            rows: page
                .items
                .iter()
                .map(|task| TaskRowView::new(task, keyword, preview_chars))
                .collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages(),
            show_pagination: page.total > page.page_size as usize,
        }
    }
}

/// `7/10`
pub fn difficulty_label(difficulty: Difficulty) -> String {
    format!("{}/{}", difficulty.get(), Difficulty::MAX)
}

/// 文字数（バイトではない）で切り詰め、切ったかどうかも返す
pub fn preview(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => (&text[..cut], true),
        None => (text, false),
    }
}
