//! Command-line interface for taskpad
//!
//! This module defines the CLI structure using clap derive macros.
//! Task commands live in `tasks`, the interactive view in `ui`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::filter::Filter;
use crate::storage::FileBackend;
use crate::task::TaskList;

mod tasks;
mod ui;

/// taskpad - a local task list
///
/// Add, toggle, filter, and delete short text tasks. Tasks are saved
/// locally and survive between sessions. Run without a subcommand to open
/// the interactive view.
#[derive(Parser, Debug)]
#[command(name = "taskpad")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the task store
    #[arg(long, global = true, env = "TASKPAD_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true, env = "TASKPAD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive task list (default)
    Ui {
        /// Filter selected on start
        #[arg(long, value_enum)]
        filter: Option<Filter>,
    },

    /// Add a task
    Add {
        /// Task description (words are joined with spaces)
        #[arg(num_args = 0.., allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Flip a task between active and completed
    Toggle {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },

    /// List tasks
    List {
        /// Which tasks to show
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
    },

    /// Remove every task
    Clear,
}

/// Resolved config and store location shared by every command
pub(crate) struct Context {
    pub config: Config,
    pub data_dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    fn resolve(
        data_dir: Option<PathBuf>,
        config: Option<PathBuf>,
        json: bool,
        quiet: bool,
    ) -> Result<Self> {
        let config = match config {
            Some(path) => Config::load(&path)?,
            None => match Config::default_path() {
                Some(path) => Config::load_or_default(&path)?,
                None => Config::default(),
            },
        };
        let data_dir = data_dir
            .or_else(|| config.store.dir.clone())
            .unwrap_or_else(FileBackend::default_dir);
        tracing::debug!(data_dir = %data_dir.display(), key = %config.store.key, "resolved store");
        Ok(Self {
            config,
            data_dir,
            json,
            quiet,
        })
    }

    pub(crate) fn open_tasks(&self) -> TaskList<FileBackend> {
        TaskList::load(FileBackend::new(&self.data_dir), self.config.store.key.clone())
    }

    pub(crate) fn output(&self) -> crate::output::OutputOptions {
        crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let ctx = Context::resolve(self.data_dir, self.config, self.json, self.quiet)?;
        match self.command {
            None => ui::run(&ctx, None),
            Some(Commands::Ui { filter }) => ui::run(&ctx, filter),
            Some(Commands::Add { description }) => tasks::run_add(&ctx, &description.join(" ")),
            Some(Commands::Toggle { id }) => tasks::run_toggle(&ctx, &id),
            Some(Commands::Delete { id }) => tasks::run_delete(&ctx, &id),
            Some(Commands::List { filter }) => tasks::run_list(&ctx, filter),
            Some(Commands::Clear) => tasks::run_clear(&ctx),
        }
    }
}
