//! Command-line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use decentra_core::domain::{SortKey, TaskPriority, TaskStatus};

#[derive(Debug, Parser)]
#[command(name = "decentra", version, about = "Search a decentra task board snapshot")]
pub struct Cli {
    /// Config file (defaults to ./decentra.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter, sort and paginate the snapshot
    Search(SearchArgs),
    /// Keyword-only search with the configured result limit
    Quick(QuickArgs),
    /// Status, priority and reward statistics
    Stats(SnapshotArgs),
}

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    /// JSON array of tasks
    #[arg(long, value_name = "FILE")]
    pub tasks: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct QuickArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    pub keyword: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    #[arg(long, short)]
    pub keyword: Option<String>,

    /// Pending, InProgress, Completed, Cancelled, PendingVerification
    #[arg(long)]
    pub status: Option<TaskStatus>,

    /// Low, Medium, High, Urgent
    #[arg(long)]
    pub priority: Option<TaskPriority>,

    #[arg(long, requires = "max_difficulty")]
    pub min_difficulty: Option<u8>,

    #[arg(long, requires = "min_difficulty")]
    pub max_difficulty: Option<u8>,

    #[arg(long, requires = "max_reward")]
    pub min_reward: Option<u64>,

    #[arg(long, requires = "min_reward")]
    pub max_reward: Option<u64>,

    #[arg(long)]
    pub creator: Option<String>,

    #[arg(long, conflicts_with = "unassigned_only")]
    pub assignee: Option<String>,

    #[arg(long)]
    pub unassigned_only: bool,

    #[arg(long)]
    pub has_deadline: bool,

    /// created_at, updated_at, deadline, reward, difficulty, priority
    #[arg(long, default_value = "created_at")]
    pub sort_by: SortKey,

    /// Ascending order (default is descending)
    #[arg(long)]
    pub asc: bool,

    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Defaults to search.default_page_size
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_flags() {
        let cli = Cli::try_parse_from([
            "decentra",
            "search",
            "--tasks",
            "tasks.json",
            "--keyword",
            "react",
            "--status",
            "in_progress",
            "--min-difficulty",
            "3",
            "--max-difficulty",
            "8",
            "--sort-by",
            "reward",
            "--asc",
            "--page",
            "2",
        ])
        .unwrap();

        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.keyword.as_deref(), Some("react"));
        assert_eq!(args.status, Some(TaskStatus::InProgress));
        assert_eq!(args.min_difficulty, Some(3));
        assert_eq!(args.sort_by, SortKey::Reward);
        assert!(args.asc);
        assert_eq!(args.page, 2);
        assert_eq!(args.page_size, None);
    }

    #[test]
    fn rejects_unknown_sort_key() {
        let result = Cli::try_parse_from([
            "decentra", "search", "--tasks", "t.json", "--sort-by", "title",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quick_takes_a_positional_keyword() {
        let cli =
            Cli::try_parse_from(["decentra", "-q", "quick", "--tasks", "t.json", "design"]).unwrap();
        assert!(cli.quiet);
        let Command::Quick(args) = cli.command else {
            panic!("expected quick");
        };
        assert_eq!(args.keyword, "design");
    }
}
