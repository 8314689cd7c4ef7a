//! Text and JSON output.

use decentra_core::config::AppConfig;
use decentra_core::domain::{Task, TaskPriority, TaskStatus};
use decentra_core::observability::TaskStatistics;
use decentra_core::present::{SearchResultsView, TaskRowView, render_marked};

use crate::cli::SnapshotArgs;

pub fn results(view: &SearchResultsView<'_>, output: &SnapshotArgs) -> anyhow::Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    if view.rows.is_empty() {
        println!("no matching tasks ({} total)", view.total);
        return Ok(());
    }
    for row in &view.rows {
        println!("{}", row_text(row));
    }
    if view.show_pagination {
        println!(
            "-- page {}/{} ({} tasks, {} per page)",
            view.page, view.total_pages, view.total, view.page_size
        );
    } else {
        println!("-- {} tasks", view.total);
    }
    Ok(())
}

pub fn quick(
    found: &[Task],
    keyword: &str,
    output: &SnapshotArgs,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let preview = config.search.description_preview_chars;
    let rows: Vec<TaskRowView<'_>> = found
        .iter()
        .map(|task| TaskRowView::new(task, keyword, preview))
        .collect();

    if output.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    if rows.is_empty() {
        println!("no matching tasks");
    }
    for row in &rows {
        println!("{}", row_text(row));
    }
    Ok(())
}

pub fn stats(stats: &TaskStatistics, output: &SnapshotArgs) -> anyhow::Result<()> {
    if output.json {
        println!("{}", serde_json::to_string_pretty(stats)?);
        return Ok(());
    }

    println!("tasks:        {}", stats.total);
    for status in TaskStatus::ALL {
        println!("  {:<22}{}", status.to_string(), stats.count(status));
    }
    for priority in TaskPriority::ALL {
        let count = stats.by_priority.get(&priority).copied().unwrap_or_default();
        println!("  {:<22}{}", priority.to_string(), count);
    }
    println!("difficulty:");
    for (difficulty, count) in &stats.by_difficulty {
        println!(
            "  {:<22}{} ({:.1}%)",
            format!("{difficulty}/10"),
            count,
            stats.percentage(*count)
        );
    }
    println!("reward:");
    for bucket in &stats.reward_buckets {
        println!(
            "  {:<22}{} ({:.1}%), total {}",
            bucket.label(),
            bucket.count,
            stats.percentage(bucket.count),
            bucket.total_reward
        );
    }
    println!("total reward: {}", stats.total_reward);
    println!("avg difficulty: {:.1}", stats.average_difficulty);
    println!("completion:   {:.1}%", stats.completion_rate());
    println!("overdue:      {}", stats.overdue);
    Ok(())
}

fn row_text(row: &TaskRowView<'_>) -> String {
    let assignee = row
        .assignee
        .map(|a| a.as_str())
        .unwrap_or("-");
    let mut text = format!(
        "{:>4}  {}  [{}] [{}]  reward {}  difficulty {}  creator {}  assignee {}",
        row.id.get(),
        render_marked(&row.title, "[", "]"),
        row.status.label,
        row.priority.label,
        row.reward,
        row.difficulty,
        row.creator,
        assignee,
    );
    let description = render_marked(&row.description, "[", "]");
    if !description.is_empty() {
        text.push_str("\n      ");
        text.push_str(&description);
        if row.truncated {
            text.push_str("...");
        }
    }
    text
}
