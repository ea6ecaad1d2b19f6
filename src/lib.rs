//! taskboard - task dashboard engine
//!
//! Pure derivations over a read-only snapshot of task records: deadline and
//! overdue notifications, per-status statistics, status/priority/text
//! filtering and calendar day lookups.
//!
//! # Module Organization
//!
//! - `task`: Task records, closed status/priority enums, validation
//! - `store`: Read-only task snapshots (JSON files, built-in sample)
//! - `notify`: Deadline and overdue notification derivation
//! - `stats`: Per-status counts and completion rate
//! - `filter`: Filter criteria and order-preserving filtering
//! - `calendar`: Tasks due on a day, display-locale date formatting
//! - `rules`: Optional overdue auto-transition rule
//! - `dashboard`: Owned dashboard inputs and the recompute entry point
//! - `config`: Configuration loading from `.taskboard.toml`
//! - `output`: Human and JSON output envelopes
//! - `cli`: Command-line interface using clap
//! - `error`: Error types and result aliases

pub mod calendar;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod notify;
pub mod output;
pub mod rules;
pub mod stats;
pub mod store;
pub mod task;

pub use calendar::tasks_on_date;
pub use error::{Error, Result};
pub use filter::filter_tasks;
pub use notify::derive_notifications;
pub use stats::compute_statistics;
