//! Command-line interface for taskboard
//!
//! This module defines the CLI structure using clap derive macros.
//! Command implementations live in `task` and `init`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

mod init;
mod task;

/// taskboard - task dashboard
///
/// Derives deadline notifications, statistics, filtered task lists and
/// calendar day views from a read-only task snapshot.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Task file (JSON); the built-in sample snapshot is used when omitted
    #[arg(long, global = true, env = "TASKBOARD_TASKS")]
    pub tasks: Option<PathBuf>,

    /// Config file (defaults to .taskboard.toml in the current directory)
    #[arg(long, global = true, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reference instant: YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS] (defaults to local now)
    #[arg(long, global = true)]
    pub now: Option<String>,

    /// Treat open tasks past their due day as overdue
    #[arg(long, global = true)]
    pub auto_overdue: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deadline and overdue notifications
    Notifications {
        /// Show at most this many notifications
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Task counts per status and completion rate
    Stats,

    /// List tasks matching status, priority and text filters
    List {
        /// Status filter: all, pending, in_progress, completed, overdue
        #[arg(long)]
        status: Option<String>,

        /// Priority filter: all, low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Case-insensitive text matched against title, description and assignee
        #[arg(long)]
        search: Option<String>,
    },

    /// Tasks due on a calendar day
    Calendar {
        /// Day to show (YYYY-MM-DD); defaults to the day of --now
        #[arg(long)]
        date: Option<String>,
    },

    /// Notifications, statistics, filtered tasks and day view in one pass
    Dashboard {
        /// Status filter: all, pending, in_progress, completed, overdue
        #[arg(long)]
        status: Option<String>,

        /// Priority filter: all, low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Case-insensitive text matched against title, description and assignee
        #[arg(long)]
        search: Option<String>,

        /// Day for the calendar panel (YYYY-MM-DD); defaults to the day of --now
        #[arg(long)]
        date: Option<String>,
    },

    /// Validate the task file
    Check,

    /// Write a default config file (.taskboard.toml or --config)
    Init,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let global = task::GlobalOptions {
            tasks: self.tasks,
            config: self.config,
            now: self.now,
            auto_overdue: self.auto_overdue,
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Notifications { limit } => {
                task::run_notifications(task::NotificationsOptions { limit, global })
            }
            Commands::Stats => task::run_stats(task::StatsOptions { global }),
            Commands::List {
                status,
                priority,
                search,
            } => task::run_list(task::ListOptions {
                status,
                priority,
                search,
                global,
            }),
            Commands::Calendar { date } => {
                task::run_calendar(task::CalendarOptions { date, global })
            }
            Commands::Dashboard {
                status,
                priority,
                search,
                date,
            } => task::run_dashboard(task::DashboardOptions {
                status,
                priority,
                search,
                date,
                global,
            }),
            Commands::Check => task::run_check(task::CheckOptions { global }),
            Commands::Init => init::run(global.config, global.json, global.quiet),
        }
    }
}
