//! Command-line front end over `kanban_core`.
//!
//! # Responsibility
//! - Open a board store file and print statistics or the board list.
//! - Export the current board to JSON and import boards from JSON files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kanban_core::db::open_db;
use kanban_core::{
    init_logging, BoardStats, BoardWorkspace, LogConfig, MutationContext, SqliteKeyValueStore,
};
use log::info;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban_cli")]
#[command(version, about = "Inspect and transfer Kanban boards", long_about = None)]
struct Cli {
    /// SQLite store file; created when missing
    #[arg(long)]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print statistics for the current board
    Stats,
    /// Write the current board as JSON
    Export {
        /// Output file; defaults to a name derived from the board title
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Import a board from a JSON file and select it
    Import {
        file: PathBuf,
    },
    /// List every board in the store
    Boards,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let config = match cli.log_level.as_deref() {
            Some(level) => LogConfig::new(level, log_dir),
            None => LogConfig::with_default_level(log_dir),
        }
        .context("invalid logging options")?;
        init_logging(&config).context("failed to start logging")?;
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open store `{}`", cli.db.display()))?;
    let ctx = MutationContext::default();
    let mut workspace = BoardWorkspace::load(SqliteKeyValueStore::new(&conn), &ctx);
    info!(
        "event=cli_command module=cli status=start boards={}",
        workspace.boards().len()
    );

    match cli.command {
        Commands::Stats => {
            let board = workspace.current_board();
            let stats = BoardStats::compute(board, ctx.now);
            println!("board: {} ({})", board.title, board.id);
            println!("cards: {}", stats.total_cards);
            println!(
                "completed: {} ({}%)",
                stats.completed_cards, stats.completion_rate
            );
            println!("overdue: {}", stats.overdue_cards);
            println!("tracked: {}h", stats.tracked_hours());
            println!("members: {}", stats.member_count);
            for list in &stats.per_list {
                let marker = if stats.over_wip_limit.contains(&list.list_id) {
                    " (over WIP limit)"
                } else {
                    ""
                };
                println!("  {}: {}{}", list.title, list.cards, marker);
            }
        }
        Commands::Export { out } => {
            let (file_name, json) = workspace.export_current();
            let path = out.unwrap_or_else(|| PathBuf::from(file_name));
            fs::write(&path, json)
                .with_context(|| format!("failed to write `{}`", path.display()))?;
            println!("exported {}", path.display());
        }
        Commands::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read `{}`", file.display()))?;
            let board = workspace
                .import_board(&text)
                .with_context(|| format!("failed to import `{}`", file.display()))?;
            println!("imported {} ({})", board.title, board.id);
        }
        Commands::Boards => {
            let current_id = workspace.current_board().id.clone();
            for board in workspace.boards() {
                let marker = if board.id == current_id { "*" } else { " " };
                let state = if board.archived { " [archived]" } else { "" };
                println!(
                    "{marker} {} {} ({} lists, {} cards){state}",
                    board.id,
                    board.title,
                    board.lists.len(),
                    board.card_count()
                );
            }
            let slots = SqliteKeyValueStore::new(&conn)
                .keys()
                .context("failed to list stored slots")?;
            println!("slots: {}", slots.join(", "));
        }
    }

    Ok(())
}
