//! Terminal entry point for the task list.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Open the configured storage and hand it to the terminal host.

mod host;

use clap::{Parser, Subcommand};
use host::TerminalHost;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_core::config::ConfigOverrides;
use tasklist_core::{
    init_logging, AppConfig, KeyValueTaskStore, MemoryKeyValueStore, SqliteKeyValueStore,
    StorageBackend, TaskStore,
};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(version)]
#[command(about = "A small persistent to-do list")]
struct Cli {
    /// SQLite file holding the task list
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
    /// Keep tasks in memory only
    #[arg(long, conflicts_with = "db")]
    memory: bool,
    /// Storage key the task list is saved under
    #[arg(long, value_name = "NAME")]
    key: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stored tasks and exit
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        storage_key: cli.key,
        db_path: cli.db,
        in_memory: cli.memory,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
    };

    let config = match AppConfig::resolve(overrides) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("tasklist: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(dir) = &config.log_dir {
        if let Err(err) = init_logging(config.log_level.as_str(), dir) {
            eprintln!("tasklist: logging disabled: {err}");
        }
    }

    let result = match &config.backend {
        StorageBackend::Memory => run(
            KeyValueTaskStore::new(MemoryKeyValueStore::new(), &config.storage_key),
            &cli.command,
        ),
        StorageBackend::Sqlite(path) => match SqliteKeyValueStore::open(path) {
            Ok(kv) => run(KeyValueTaskStore::new(kv, &config.storage_key), &cli.command),
            Err(err) => {
                eprintln!("tasklist: cannot open `{}`: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tasklist: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run<S: TaskStore>(store: S, command: &Option<Commands>) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    match command {
        Some(Commands::List) => {
            let snapshot = store
                .load()
                .map_err(io::Error::other)?;
            for text in snapshot.tasks {
                writeln!(stdout, "{text}")?;
            }
            Ok(())
        }
        None => TerminalHost::start(store).run(io::stdin().lock(), &mut stdout),
    }
}
