//! Dashboard state and the recompute entry point.
//!
//! The dashboard owns its inputs (snapshot, reference instant, filter
//! criteria, selected day, rules) and derives every view from scratch on
//! each `recompute`. Nothing is cached between passes; callers replace an
//! input and recompute.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::calendar::tasks_on_date;
use crate::filter::{filter_tasks, FilterCriteria};
use crate::notify::{derive_notifications_with, Notification, NotificationRules};
use crate::stats::{compute_statistics, Statistics};
use crate::task::Task;

#[derive(Debug, Clone)]
pub struct Dashboard {
    tasks: Vec<Task>,
    now: NaiveDateTime,
    criteria: FilterCriteria,
    selected_date: Option<NaiveDate>,
    rules: NotificationRules,
}

/// One full derivation pass.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub now: NaiveDateTime,
    pub notifications: Vec<Notification<'a>>,
    pub statistics: Statistics,
    pub criteria: &'a FilterCriteria,
    pub filtered: Vec<&'a Task>,
    pub selected_date: Option<NaiveDate>,
    pub on_selected_date: Vec<&'a Task>,
}

impl Dashboard {
    /// Start from a snapshot; the selected day defaults to `now`'s day.
    pub fn new(tasks: Vec<Task>, now: NaiveDateTime) -> Self {
        Self {
            tasks,
            now,
            criteria: FilterCriteria::default(),
            selected_date: Some(now.date()),
            rules: NotificationRules::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn select_date(&mut self, date: Option<NaiveDate>) {
        self.selected_date = date;
    }

    pub fn set_rules(&mut self, rules: NotificationRules) {
        self.rules = rules;
    }

    pub fn recompute(&self) -> DashboardView<'_> {
        let notifications = derive_notifications_with(&self.tasks, self.now, &self.rules);
        let statistics = compute_statistics(&self.tasks);
        let filtered = filter_tasks(&self.tasks, &self.criteria);
        let on_selected_date = self
            .selected_date
            .map(|date| tasks_on_date(&self.tasks, date))
            .unwrap_or_default();

        tracing::debug!(
            tasks = self.tasks.len(),
            notifications = notifications.len(),
            filtered = filtered.len(),
            on_selected_date = on_selected_date.len(),
            "recomputed dashboard"
        );

        DashboardView {
            now: self.now,
            notifications,
            statistics,
            criteria: &self.criteria,
            filtered,
            selected_date: self.selected_date,
            on_selected_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::StatusFilter;
    use crate::store::sample_tasks;
    use crate::task::TaskStatus;

    fn july(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn sample_pass_yields_expected_board() {
        let board = Dashboard::new(sample_tasks().expect("sample"), july(28, 12));
        let view = board.recompute();

        let ids: Vec<_> = view.notifications.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["deadline-1", "deadline-2", "overdue-3"]);
        assert_eq!(view.notifications[0].days, 2);
        assert_eq!(view.notifications[1].days, 1);
        assert_eq!(view.notifications[2].days, -3);
        assert_eq!(view.statistics.total, 5);
        assert_eq!(view.statistics.completion_rate, 20);
        assert_eq!(view.filtered.len(), 5);
        assert!(view.on_selected_date.is_empty());
    }

    #[test]
    fn changing_inputs_changes_next_pass() {
        let mut board = Dashboard::new(sample_tasks().expect("sample"), july(28, 12));
        board.set_criteria(FilterCriteria {
            status: StatusFilter::Only(TaskStatus::Pending),
            ..FilterCriteria::default()
        });
        board.select_date(NaiveDate::from_ymd_opt(2025, 7, 29));
        {
            let view = board.recompute();
            let filtered: Vec<_> = view.filtered.iter().map(|t| t.id.as_str()).collect();
            assert_eq!(filtered, vec!["2", "5"]);
            assert_eq!(view.on_selected_date.len(), 1);
            assert_eq!(view.on_selected_date[0].id, "2");
        }

        board.set_now(july(31, 12));
        board.set_tasks(Vec::new());
        let view = board.recompute();
        assert!(view.notifications.is_empty());
        assert_eq!(view.statistics.total, 0);
        assert_eq!(view.statistics.completion_rate, 0);
        assert!(view.filtered.is_empty());
    }

    #[test]
    fn no_selected_date_means_empty_day_panel() {
        let mut board = Dashboard::new(sample_tasks().expect("sample"), july(29, 0));
        assert_eq!(board.recompute().on_selected_date.len(), 1);
        board.select_date(None);
        assert!(board.recompute().on_selected_date.is_empty());
    }
}
