//! Status, priority and free-text filtering.
//!
//! All predicates are conjunctive and the result keeps the input order.
//! Text search lowercases both sides (Unicode-aware) and matches a
//! substring of the title, description or assignee.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::{Task, TaskPriority, TaskStatus};

const ALL: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        if value == ALL {
            return Ok(StatusFilter::All);
        }
        value.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(ALL),
            StatusFilter::Only(status) => f.write_str(status.as_str()),
        }
    }
}

impl Serialize for StatusFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(TaskPriority),
}

impl PriorityFilter {
    pub fn matches(self, priority: TaskPriority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(wanted) => wanted == priority,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        if value == ALL {
            return Ok(PriorityFilter::All);
        }
        value.parse().map(PriorityFilter::Only)
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => f.write_str(ALL),
            PriorityFilter::Only(priority) => f.write_str(priority.as_str()),
        }
    }
}

impl Serialize for PriorityFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
    pub search: String,
}

impl FilterCriteria {
    /// Build criteria from optional CLI-style values; `None` means "all".
    pub fn parse(
        status: Option<&str>,
        priority: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            status: status
                .map(str::parse::<StatusFilter>)
                .transpose()?
                .unwrap_or_default(),
            priority: priority
                .map(str::parse::<PriorityFilter>)
                .transpose()?
                .unwrap_or_default(),
            search: search.unwrap_or_default().to_string(),
        })
    }

    pub fn is_unfiltered(&self) -> bool {
        self.status == StatusFilter::All
            && self.priority == PriorityFilter::All
            && self.search.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matcher().matches(task)
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            criteria: self,
            needle: self.search.to_lowercase(),
        }
    }
}

struct Matcher<'c> {
    criteria: &'c FilterCriteria,
    needle: String,
}

impl Matcher<'_> {
    fn matches(&self, task: &Task) -> bool {
        self.criteria.status.matches(task.status)
            && self.criteria.priority.matches(task.priority)
            && self.matches_text(task)
    }

    fn matches_text(&self, task: &Task) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        [&task.title, &task.description, &task.assignee]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// Order-preserving subsequence of `tasks` matching `criteria`.
///
/// Accepts any iterator of task references, so a filtered result can be
/// filtered again.
pub fn filter_tasks<'a, I>(tasks: I, criteria: &FilterCriteria) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let matcher = criteria.matcher();
    tasks
        .into_iter()
        .filter(|task| matcher.matches(task))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn task(id: &str, title: &str, status: TaskStatus, priority: TaskPriority) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("About {title}"),
            status,
            priority,
            assignee: "Иванов А.А.".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 7, 30)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            category: "Ops".to_string(),
        }
    }

    #[test]
    fn parse_accepts_all_and_closed_values() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "overdue".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(TaskStatus::Overdue)
        );
        assert_eq!(
            "high".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(TaskPriority::High)
        );
        assert!("ALL".parse::<StatusFilter>().is_err());
        assert!("urgent".parse::<PriorityFilter>().is_err());
    }

    #[test]
    fn criteria_parse_defaults_to_unfiltered() {
        let criteria = FilterCriteria::parse(None, None, None).unwrap();
        assert!(criteria.is_unfiltered());
        assert!(FilterCriteria::parse(Some("done"), None, None).is_err());
    }

    #[test]
    fn predicates_are_conjunctive() {
        let tasks = vec![
            task("1", "Sync", TaskStatus::Pending, TaskPriority::High),
            task("2", "Sync", TaskStatus::Pending, TaskPriority::Low),
            task("3", "Sync", TaskStatus::Completed, TaskPriority::High),
            task("4", "Audit", TaskStatus::Pending, TaskPriority::High),
        ];
        let criteria = FilterCriteria {
            status: StatusFilter::Only(TaskStatus::Pending),
            priority: PriorityFilter::Only(TaskPriority::High),
            search: "SYNC".to_string(),
        };
        let ids: Vec<_> = filter_tasks(&tasks, &criteria)
            .into_iter()
            .map(|task| task.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1"]);
    }

    #[test]
    fn search_is_unicode_case_insensitive() {
        let tasks = vec![task("1", "Отчет", TaskStatus::Pending, TaskPriority::High)];
        let criteria = FilterCriteria {
            search: "иванов".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_tasks(&tasks, &criteria).len(), 1);

        let upper = FilterCriteria {
            search: "ОТЧЕТ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_tasks(&tasks, &upper).len(), 1);
    }

    #[test]
    fn search_is_not_trimmed_and_ignores_category() {
        let tasks = vec![task("1", "Sync", TaskStatus::Pending, TaskPriority::High)];
        let padded = FilterCriteria {
            search: " sync ".to_string(),
            ..FilterCriteria::default()
        };
        assert!(filter_tasks(&tasks, &padded).is_empty());

        let category = FilterCriteria {
            search: "ops".to_string(),
            ..FilterCriteria::default()
        };
        assert!(filter_tasks(&tasks, &category).is_empty());
    }

    #[test]
    fn refiltering_is_idempotent() {
        let tasks = vec![
            task("1", "Sync", TaskStatus::Pending, TaskPriority::High),
            task("2", "Audit", TaskStatus::Overdue, TaskPriority::High),
        ];
        let criteria = FilterCriteria {
            priority: PriorityFilter::Only(TaskPriority::High),
            search: "sync".to_string(),
            ..FilterCriteria::default()
        };
        let once = filter_tasks(&tasks, &criteria);
        let twice = filter_tasks(once.iter().copied(), &criteria);
        assert_eq!(once, twice);
    }
}
