//! taskpad CLI shell.
//!
//! # Responsibility
//! - Parse user intents and forward them to the task list store.
//! - Render the store's current view after every command, standing in for
//!   the page re-render the store was written against.
//!
//! # Invariants
//! - Store operations never fail a command; only environment bootstrap
//!   (data directory, logging, database open) can exit non-zero.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use taskpad_core::db::open_db;
use taskpad_core::{
    default_log_level, init_logging, Filter, SqliteStateStorage, TaskId, TaskListStore,
};

const DATA_DIR_NAME: &str = ".taskpad";
const DB_FILE_NAME: &str = "taskpad.sqlite3";
const LOG_DIR_NAME: &str = "logs";

#[derive(Parser)]
#[command(name = "taskpad")]
#[command(version = taskpad_core::core_version())]
#[command(about = "Single-user task list with local persistence")]
struct Cli {
    /// Directory holding the task database and logs
    #[arg(long, env = "TASKPAD_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, env = "TASKPAD_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task (whitespace-only text is ignored)
    Add {
        /// Task text
        text: String,
    },
    /// Show tasks under a view filter
    List {
        /// all | active | done
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        filter: Filter,
    },
    /// Mark a task done
    Done {
        /// Task id as shown by `list`
        id: TaskId,
    },
    /// Mark a task pending again
    Undone {
        /// Task id as shown by `list`
        id: TaskId,
    },
    /// Remove a task
    Rm {
        /// Task id as shown by `list`
        id: TaskId,
    },
    /// Remove every completed task
    ClearDone,
    /// Mark all tasks done, or all undone when everything is already done
    ToggleAll,
    /// Rename a task (empty text removes it)
    Edit {
        /// Task id as shown by `list`
        id: TaskId,
        /// Replacement text
        text: String,
    },
    /// Print the number of pending tasks
    Count,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("taskpad: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    std::fs::create_dir_all(&data_dir).map_err(|err| {
        format!(
            "cannot create data directory `{}`: {err}",
            data_dir.display()
        )
    })?;

    let level = cli
        .log_level
        .unwrap_or_else(|| default_log_level().to_string());
    let log_dir = data_dir.join(LOG_DIR_NAME);
    init_logging(&level, &log_dir.to_string_lossy())?;

    let conn = open_db(data_dir.join(DB_FILE_NAME))
        .map_err(|err| format!("cannot open task database: {err}"))?;
    let storage = SqliteStateStorage::try_new(conn)
        .map_err(|err| format!("task database is not usable: {err}"))?;
    let mut store = TaskListStore::load(storage);

    dispatch(&mut store, cli.command);
    Ok(())
}

fn dispatch(store: &mut TaskListStore<SqliteStateStorage>, command: Commands) {
    match command {
        Commands::Add { text } => {
            store.add(&text);
            render(store);
        }
        Commands::List { filter } => {
            store.set_filter(filter);
            render(store);
        }
        Commands::Done { id } => {
            store.set_done(id, true);
            render(store);
        }
        Commands::Undone { id } => {
            store.set_done(id, false);
            render(store);
        }
        Commands::Rm { id } => {
            store.remove(id);
            render(store);
        }
        Commands::ClearDone => {
            store.clear_done();
            render(store);
        }
        Commands::ToggleAll => {
            store.toggle_all();
            render(store);
        }
        Commands::Edit { id, text } => {
            store.start_edit(id);
            store.commit_edit(id, &text);
            render(store);
        }
        Commands::Count => {
            println!("{}", store.pending_count());
        }
    }
}

fn render(store: &TaskListStore<SqliteStateStorage>) {
    let view = store.filtered_view();
    if view.is_empty() {
        println!("(no tasks under filter `{}`)", store.filter().as_str());
    } else {
        for task in &view {
            let mark = if task.done { "[x]" } else { "[ ]" };
            println!("{mark} {:>4}  {}", task.id, task.text);
        }
    }

    let pending = store.pending_count();
    let suffix = if pending == 1 { "" } else { "s" };
    println!("{pending} item{suffix} left");
}

fn parse_filter(value: &str) -> Result<Filter, String> {
    Filter::parse(value).ok_or_else(|| format!("expected one of all|active|done, got `{value}`"))
}

fn resolve_data_dir(arg: Option<PathBuf>) -> Result<PathBuf, String> {
    let dir = match arg {
        Some(dir) => dir,
        None => dirs::home_dir()
            .ok_or_else(|| "cannot determine home directory; pass --data-dir".to_string())?
            .join(DATA_DIR_NAME),
    };

    if dir.is_absolute() {
        return Ok(dir);
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .map_err(|err| format!("cannot resolve current directory: {err}"))
}
