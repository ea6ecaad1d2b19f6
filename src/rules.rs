//! Optional status transition rules.
//!
//! The stored status is authoritative: no derivation ever re-derives
//! `overdue` from the due date. `OverdueRule::DueDatePassed` is the one
//! opt-in exception, and it works on a copy of the snapshot so the source
//! records stay as authored.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverdueRule {
    /// Only tasks stored as `overdue` are overdue.
    #[default]
    StatusOnly,
    /// Open tasks whose due day is before today are treated as overdue.
    DueDatePassed,
}

impl OverdueRule {
    pub fn from_flag(auto_overdue: bool) -> Self {
        if auto_overdue {
            OverdueRule::DueDatePassed
        } else {
            OverdueRule::StatusOnly
        }
    }

    /// Status the derivations should see for `task` at `now`.
    pub fn effective_status(self, task: &Task, now: NaiveDateTime) -> TaskStatus {
        match self {
            OverdueRule::StatusOnly => task.status,
            OverdueRule::DueDatePassed => match task.status {
                TaskStatus::Pending | TaskStatus::InProgress if task.due_day() < now.date() => {
                    TaskStatus::Overdue
                }
                status => status,
            },
        }
    }

    /// Reclassified copy of `tasks`. With `StatusOnly` this is a plain clone.
    pub fn apply(self, tasks: &[Task], now: NaiveDateTime) -> Vec<Task> {
        tasks
            .iter()
            .map(|task| {
                let status = self.effective_status(task, now);
                if status == task.status {
                    task.clone()
                } else {
                    Task {
                        status,
                        ..task.clone()
                    }
                }
            })
            .collect()
    }
}
