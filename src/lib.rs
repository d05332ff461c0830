//! taskpad - local task list library
//!
//! Core of the taskpad CLI: a flat, insertion-ordered list of tasks kept in
//! a local key-value store, a visibility filter, and transient
//! notifications reporting the outcome of each action.
//!
//! # Module Organization
//!
//! - `storage`: Key-value backends and the self-persisting `Persisted` cell
//! - `task`: Task records and the persisted `TaskList`
//! - `filter`: All/active/completed filter, derived view list and counts
//! - `notify`: Notifications and the bounded, expiring queue
//! - `actions`: Handlers mapping task operations to notifications
//! - `ui`: Interactive terminal view (ratatui)
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `config.toml`
//! - `output`: Human and JSON output
//! - `lock`: File locking and atomic writes
//! - `error`: Error types and result aliases

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod lock;
pub mod notify;
pub mod output;
pub mod storage;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
