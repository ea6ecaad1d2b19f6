//! Task records for the dashboard.
//!
//! A `TaskRecord` is the wire form read from a task file. It is validated
//! once into a `Task`, the immutable value every derivation works on, so a
//! malformed status, priority or due date never reaches the engine.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "overdue" => Ok(TaskStatus::Overdue),
            other => Err(Error::InvalidArgument(format!(
                "unknown status '{other}' (expected pending|in_progress|completed|overdue)"
            ))),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low|medium|high)"
            ))),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated task as it appears in a task file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub assignee: String,
    #[serde(alias = "dueDate")]
    pub due_date: String,
    pub category: String,
}

/// Validated, immutable task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee: String,
    pub due_date: NaiveDateTime,
    pub category: String,
}

impl Task {
    /// Calendar day the task is due on.
    pub fn due_day(&self) -> NaiveDate {
        self.due_date.date()
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = Error;

    fn try_from(record: TaskRecord) -> Result<Self> {
        let id = record.id;
        if id.trim().is_empty() {
            return Err(Error::InvalidTask {
                id,
                reason: "id cannot be empty".to_string(),
            });
        }
        if id.trim() != id {
            return Err(Error::InvalidTask {
                id,
                reason: "id has leading or trailing whitespace".to_string(),
            });
        }

        let status = record.status.parse::<TaskStatus>().map_err(|err| Error::InvalidTask {
            id: id.clone(),
            reason: reason_of(err),
        })?;
        let priority = record
            .priority
            .parse::<TaskPriority>()
            .map_err(|err| Error::InvalidTask {
                id: id.clone(),
                reason: reason_of(err),
            })?;
        let due_date = parse_due_date(&record.due_date).ok_or_else(|| Error::InvalidDate {
            id: id.clone(),
            value: record.due_date.clone(),
        })?;

        Ok(Task {
            id,
            title: record.title,
            description: record.description,
            status,
            priority,
            assignee: record.assignee,
            due_date,
            category: record.category,
        })
    }
}

/// Validate a whole snapshot; ids must be unique across it.
pub fn tasks_from_records(records: Vec<TaskRecord>) -> Result<Vec<Task>> {
    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(records.len());
    for record in records {
        let task = Task::try_from(record)?;
        if !seen.insert(task.id.clone()) {
            return Err(Error::InvalidTask {
                id: task.id,
                reason: "duplicate id".to_string(),
            });
        }
        tasks.push(task);
    }
    Ok(tasks)
}

/// Parse a timezone-naive due date. Date-only values mean midnight.
pub fn parse_due_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some(date.and_time(NaiveTime::MIN));
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn reason_of(err: Error) -> String {
    match err {
        Error::InvalidArgument(message) => message,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: &str, priority: &str, due: &str) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            title: "Title".to_string(),
            description: "Description".to_string(),
            status: status.to_string(),
            priority: priority.to_string(),
            assignee: "Someone".to_string(),
            due_date: due.to_string(),
            category: "General".to_string(),
        }
    }

    #[test]
    fn status_parse_is_strict() {
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert!("In_Progress".parse::<TaskStatus>().is_err());
        assert!("done".parse::<TaskStatus>().is_err());
        assert!("all".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn status_round_trips_through_as_str() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
        for priority in TaskPriority::ALL {
            assert_eq!(priority.as_str().parse::<TaskPriority>().unwrap(), priority);
        }
    }

    #[test]
    fn due_date_accepts_date_and_datetime_forms() {
        let midnight = parse_due_date("2025-07-30").expect("date");
        assert_eq!(midnight.to_string(), "2025-07-30 00:00:00");

        let minutes = parse_due_date("2025-07-30T14:05").expect("minutes");
        assert_eq!(minutes.to_string(), "2025-07-30 14:05:00");

        let seconds = parse_due_date("2025-07-30 14:05:09").expect("seconds");
        assert_eq!(seconds.to_string(), "2025-07-30 14:05:09");

        assert!(parse_due_date("2025-07-30T14:05:09.250").is_some());
        assert!(parse_due_date("30.07.2025").is_none());
        assert!(parse_due_date("2025-02-30").is_none());
    }

    #[test]
    fn unknown_status_is_rejected_not_defaulted() {
        let err = Task::try_from(record("7", "blocked", "low", "2025-07-30")).expect_err("status");
        match err {
            Error::InvalidTask { id, reason } => {
                assert_eq!(id, "7");
                assert!(reason.contains("blocked"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let err = Task::try_from(record("7", "pending", "urgent", "2025-07-30")).expect_err("prio");
        assert!(matches!(err, Error::InvalidTask { .. }));
    }

    #[test]
    fn bad_due_date_is_invalid_date() {
        let err = Task::try_from(record("7", "pending", "low", "tomorrow")).expect_err("date");
        match err {
            Error::InvalidDate { id, value } => {
                assert_eq!(id, "7");
                assert_eq!(value, "tomorrow");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = Task::try_from(record("  ", "pending", "low", "2025-07-30")).expect_err("id");
        assert!(matches!(err, Error::InvalidTask { .. }));
    }

    #[test]
    fn padded_id_is_rejected_not_trimmed() {
        for id in [" 1", "1 ", "\t1"] {
            let err = Task::try_from(record(id, "pending", "low", "2025-07-30")).expect_err("id");
            match err {
                Error::InvalidTask { id: reported, reason } => {
                    assert_eq!(reported, id);
                    assert!(reason.contains("whitespace"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let records = vec![
            record("1", "pending", "low", "2025-07-30"),
            record("1", "completed", "high", "2025-07-31"),
        ];
        let err = tasks_from_records(records).expect_err("duplicate");
        match err {
            Error::InvalidTask { id, reason } => {
                assert_eq!(id, "1");
                assert_eq!(reason, "duplicate id");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn record_alias_accepts_camel_case_due_date() {
        let json = r#"{
            "id": "1", "title": "T", "description": "D", "status": "pending",
            "priority": "low", "assignee": "A", "dueDate": "2025-07-30", "category": "C"
        }"#;
        let record: TaskRecord = serde_json::from_str(json).expect("record");
        let task = Task::try_from(record).expect("task");
        assert_eq!(task.due_day(), NaiveDate::from_ymd_opt(2025, 7, 30).unwrap());
    }
}
