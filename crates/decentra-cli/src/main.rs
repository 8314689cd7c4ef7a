//! decentra - タスクボードのスナップショットをコマンドラインで検索する
//!
//! JSON のスナップショットを InMemoryChain に読み込み、
//! 本番と同じ TaskSearchService 経由で検索します。

mod cli;
mod render;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use decentra_core::app::{App, AppBuilder};
use decentra_core::config::AppConfig;
use decentra_core::domain::{SearchFilters, Task};
use decentra_core::impls::InMemoryChain;
use decentra_core::ports::{Clock, SystemClock};

use crate::cli::{Cli, Command, SearchArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load config")?,
    };
    init_tracing(cli.quiet, cli.verbose, &config.log.level)?;

    match cli.command {
        Command::Search(args) => {
            let app = build_app(&args.snapshot.tasks, config)?;
            run_search(&app, &args).await
        }
        Command::Quick(args) => {
            let app = build_app(&args.snapshot.tasks, config)?;
            let found = app.search().quick_search(&args.keyword).await?;
            render::quick(&found, &args.keyword, &args.snapshot, app.config())
        }
        Command::Stats(args) => {
            let app = build_app(&args.tasks, config)?;
            let stats = app.search().statistics().await?;
            render::stats(&stats, &args)
        }
    }
}

/// DECENTRA_LOG があればそれを優先し、なければ -q / -v / 設定の順
fn init_tracing(quiet: bool, verbose: bool, configured: &str) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("DECENTRA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn load_snapshot(path: &Path) -> anyhow::Result<Vec<Task>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read task snapshot {}", path.display()))?;
    let tasks: Vec<Task> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse task snapshot {}", path.display()))?;
    tracing::debug!(count = tasks.len(), path = %path.display(), "loaded task snapshot");
    Ok(tasks)
}

fn build_app(tasks: &Path, config: AppConfig) -> anyhow::Result<App> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let chain = Arc::new(InMemoryChain::from_snapshot(load_snapshot(tasks)?, clock.clone()));
    AppBuilder::new()
        .task_source(chain)
        .clock(clock)
        .config(config)
        .build()
        .context("failed to build app")
}

async fn run_search(app: &App, args: &SearchArgs) -> anyhow::Result<()> {
    let mut filters = SearchFilters::new();
    if let Some(keyword) = &args.keyword {
        filters = filters.keyword(keyword.clone());
    }
    if let Some(status) = args.status {
        filters = filters.status(status);
    }
    if let Some(priority) = args.priority {
        filters = filters.priority(priority);
    }
    if let (Some(min), Some(max)) = (args.min_difficulty, args.max_difficulty) {
        filters = filters.difficulty_range(min, max);
    }
    if let (Some(min), Some(max)) = (args.min_reward, args.max_reward) {
        filters = filters.reward_range(min, max);
    }
    if let Some(creator) = &args.creator {
        filters = filters.creator(creator.clone());
    }
    if let Some(assignee) = &args.assignee {
        filters = filters.assignee(assignee.clone());
    }
    if args.unassigned_only {
        filters = filters.unassigned_only();
    }
    if args.has_deadline {
        filters = filters.has_deadline();
    }

    let service = app.search();
    let page_size = args
        .page_size
        .unwrap_or(service.settings().default_page_size);
    let request = service
        .request(filters)
        .sorted_by(args.sort_by, !args.asc)
        .page(args.page, page_size);

    let page = service.search(&request).await?;
    let keyword = args.keyword.as_deref().unwrap_or_default();
    render::results(&service.results_view(&page, keyword), &args.snapshot)
}
