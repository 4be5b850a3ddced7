use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use questboard::board::TaskEdit;
use questboard::domain::{Column, Difficulty};

mod cli;

use cli::{Session, parse_column, parse_difficulty, parse_due_date};

#[derive(Parser)]
#[command(name = "questboard")]
#[command(about = "Questboard - a three-column task board that levels you up")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.questboard/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dry run against an empty in-memory store; nothing persists past this
    /// command and tasks from earlier runs are not visible
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new ~/.questboard/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Add a task to the board
    Add {
        title: String,

        /// do_first, do_later or do_free
        #[arg(long, value_parser = parse_column)]
        column: Option<Column>,

        /// 1 (easy), 2 (medium) or 3 (hard)
        #[arg(short, long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,

        #[arg(short, long)]
        notes: Option<String>,

        /// Repeat for several tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List active tasks by column
    List,

    /// Edit an active task
    Edit {
        /// Task id or unique prefix
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        #[arg(long)]
        clear_notes: bool,

        /// do_first, do_later or do_free
        #[arg(long, value_parser = parse_column)]
        column: Option<Column>,

        /// 1 (easy), 2 (medium) or 3 (hard)
        #[arg(short, long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,

        /// Replace all tags; repeat for several
        #[arg(short, long = "tag", conflicts_with = "clear_tags")]
        tags: Vec<String>,

        #[arg(long)]
        clear_tags: bool,

        /// Due date as YYYY-MM-DD (UTC)
        #[arg(long, value_parser = parse_due_date, conflicts_with = "clear_due")]
        due: Option<i64>,

        #[arg(long)]
        clear_due: bool,
    },

    /// Move a task to another column
    Move {
        /// Task id or unique prefix
        id: String,

        #[arg(value_parser = parse_column)]
        column: Column,
    },

    /// Delete a task
    Delete {
        /// Task id or unique prefix
        id: String,
    },

    /// Complete a task and collect XP
    Done {
        /// Task id or unique prefix
        id: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show level, streak, quests and badges
    Progress {
        /// Print the state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show recently completed tasks
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config;
    let ephemeral = cli.ephemeral;
    let open_session = || Session::open(config_path.as_deref(), ephemeral);

    match cli.command {
        Commands::Init { force } => {
            cli::init::init_command(config_path.clone(), force).await?;
        }
        Commands::Add {
            title,
            column,
            difficulty,
            notes,
            tags,
        } => {
            let session = open_session()?;
            cli::task::add_command(&session, &title, column, difficulty, notes, tags).await?;
        }
        Commands::List => {
            cli::task::list_command(&open_session()?).await?;
        }
        Commands::Edit {
            id,
            title,
            notes,
            clear_notes,
            column,
            difficulty,
            tags,
            clear_tags,
            due,
            clear_due,
        } => {
            let edit = TaskEdit {
                title,
                notes: if clear_notes { Some(None) } else { notes.map(Some) },
                column,
                difficulty,
                tags: if clear_tags || !tags.is_empty() {
                    Some(tags)
                } else {
                    None
                },
                due_at: if clear_due { Some(None) } else { due.map(Some) },
            };
            cli::task::edit_command(&open_session()?, &id, edit).await?;
        }
        Commands::Move { id, column } => {
            cli::task::move_command(&open_session()?, &id, column).await?;
        }
        Commands::Delete { id } => {
            cli::task::delete_command(&open_session()?, &id).await?;
        }
        Commands::Done { id, json } => {
            cli::task::done_command(&open_session()?, &id, json).await?;
        }
        Commands::Progress { json } => {
            cli::progress::progress_command(&open_session()?, json).await?;
        }
        Commands::History => {
            cli::history::history_command(&open_session()?).await?;
        }
    }

    Ok(())
}
