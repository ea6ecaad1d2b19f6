use serde::Serialize;

use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: TaskStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub overdue: usize,
    pub pending: usize,
    /// Percent of tasks completed, rounded half up; 0 for an empty snapshot.
    pub completion_rate: u8,
}

impl Statistics {
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
            TaskStatus::Overdue => self.overdue,
        }
    }

    pub fn status_counts(&self) -> Vec<StatusCount> {
        TaskStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: self.count(status),
            })
            .collect()
    }
}

pub fn compute_statistics(tasks: &[Task]) -> Statistics {
    let mut stats = Statistics {
        total: tasks.len(),
        ..Statistics::default()
    };
    for task in tasks {
        match task.status {
            TaskStatus::Pending => stats.pending += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::Overdue => stats.overdue += 1,
        }
    }
    stats.completion_rate = completion_rate(stats.completed, stats.total);
    stats
}

pub fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u64;
    let total = total as u64;
    // round(100 * completed / total) in integers, halves rounding up
    ((200 * completed + total) / (2 * total)) as u8
}

pub fn format_status_counts(counts: &[StatusCount]) -> String {
    counts
        .iter()
        .map(|entry| format!("{}={}", entry.status, entry.count))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskPriority;
    use chrono::NaiveDate;

    fn task(id: usize, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: String::new(),
            description: String::new(),
            status,
            priority: TaskPriority::Low,
            assignee: String::new(),
            due_date: NaiveDate::from_ymd_opt(2025, 7, 30)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            category: String::new(),
        }
    }

    #[test]
    fn counts_dashboard_sample() {
        let tasks: Vec<Task> = [
            TaskStatus::InProgress,
            TaskStatus::Pending,
            TaskStatus::Overdue,
            TaskStatus::Completed,
            TaskStatus::Pending,
        ]
        .into_iter()
        .enumerate()
        .map(|(idx, status)| task(idx, status))
        .collect();

        let stats = compute_statistics(&tasks);
        assert_eq!(
            stats,
            Statistics {
                total: 5,
                completed: 1,
                in_progress: 1,
                overdue: 1,
                pending: 2,
                completion_rate: 20,
            }
        );
    }

    #[test]
    fn empty_snapshot_has_zero_rate() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.completion_rate, 0);
    }

    #[test]
    fn completion_rate_rounds_half_up() {
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(1, 8), 13);
        assert_eq!(completion_rate(1, 200), 1);
        assert_eq!(completion_rate(4, 4), 100);
    }

    #[test]
    fn status_counts_follow_status_order() {
        let stats = compute_statistics(&[task(0, TaskStatus::Overdue)]);
        assert_eq!(
            format_status_counts(&stats.status_counts()),
            "pending=0, in_progress=0, completed=0, overdue=1"
        );
    }
}
