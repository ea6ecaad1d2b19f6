//! Deadline and overdue notifications.
//!
//! Notifications are derived from scratch on every pass: one per task at
//! most, in task order, keyed `overdue-<id>` or `deadline-<id>`.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::rules::OverdueRule;
use crate::task::{Task, TaskStatus};

pub const DEFAULT_DEADLINE_WINDOW_DAYS: u32 = 2;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Deadline,
    Overdue,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Deadline => "deadline",
            NotificationKind::Overdue => "overdue",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Notification<'a> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub task: &'a Task,
    /// Whole days until the due date, rounded toward the future.
    pub days: i64,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationRules {
    /// Open tasks due within this many days get a deadline notification.
    pub deadline_window_days: u32,
    pub overdue: OverdueRule,
}

impl Default for NotificationRules {
    fn default() -> Self {
        Self {
            deadline_window_days: DEFAULT_DEADLINE_WINDOW_DAYS,
            overdue: OverdueRule::StatusOnly,
        }
    }
}

/// `ceil((due - now) / 1 day)`: due in one hour is 1, due 36 hours ago is -1.
pub fn days_until(due: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let millis = (due - now).num_milliseconds();
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}

pub fn derive_notifications(tasks: &[Task], now: NaiveDateTime) -> Vec<Notification<'_>> {
    derive_notifications_with(tasks, now, &NotificationRules::default())
}

pub fn derive_notifications_with<'a>(
    tasks: &'a [Task],
    now: NaiveDateTime,
    rules: &NotificationRules,
) -> Vec<Notification<'a>> {
    tasks
        .iter()
        .filter_map(|task| classify(task, now, rules))
        .collect()
}

/// Notification for a single task, if any.
pub fn classify<'a>(
    task: &'a Task,
    now: NaiveDateTime,
    rules: &NotificationRules,
) -> Option<Notification<'a>> {
    let days = days_until(task.due_date, now);
    let window = i64::from(rules.deadline_window_days);

    // The stored status wins over the sign of `days`.
    match rules.overdue.effective_status(task, now) {
        TaskStatus::Overdue => Some(Notification {
            id: format!("overdue-{}", task.id),
            kind: NotificationKind::Overdue,
            task,
            days,
            message: format!(
                "Task \"{}\" is overdue by {} day(s).",
                task.title,
                days.abs()
            ),
        }),
        TaskStatus::Completed => None,
        TaskStatus::Pending | TaskStatus::InProgress if (0..=window).contains(&days) => {
            Some(Notification {
                id: format!("deadline-{}", task.id),
                kind: NotificationKind::Deadline,
                task,
                days,
                message: format!("Deadline for task \"{}\" in {} day(s).", task.title, days),
            })
        }
        TaskStatus::Pending | TaskStatus::InProgress => None,
    }
}
