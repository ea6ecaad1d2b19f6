//! taskboard command implementations.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::calendar::{parse_date, tasks_on_date, DisplayLocale};
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::error::{Error, Result};
use crate::filter::{filter_tasks, FilterCriteria};
use crate::notify::{derive_notifications_with, Notification, NotificationRules};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::rules::OverdueRule;
use crate::stats::{compute_statistics, format_status_counts, Statistics};
use crate::store::TaskSource;
use crate::task::{parse_due_date, Task};

pub struct GlobalOptions {
    pub tasks: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub now: Option<String>,
    pub auto_overdue: bool,
    pub json: bool,
    pub quiet: bool,
}

impl GlobalOptions {
    fn output(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }
}

pub struct NotificationsOptions {
    pub limit: Option<usize>,
    pub global: GlobalOptions,
}

pub struct StatsOptions {
    pub global: GlobalOptions,
}

pub struct ListOptions {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub global: GlobalOptions,
}

pub struct CalendarOptions {
    pub date: Option<String>,
    pub global: GlobalOptions,
}

pub struct DashboardOptions {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    pub date: Option<String>,
    pub global: GlobalOptions,
}

pub struct CheckOptions {
    pub global: GlobalOptions,
}

struct BoardContext {
    source: TaskSource,
    tasks: Vec<Task>,
    now: NaiveDateTime,
    rules: NotificationRules,
    config: Config,
}

impl BoardContext {
    fn locale(&self) -> DisplayLocale {
        self.config.display.locale
    }
}

#[derive(serde::Serialize)]
struct NotificationsOutput<'a> {
    now: NaiveDateTime,
    total: usize,
    notifications: Vec<Notification<'a>>,
}

pub fn run_notifications(options: NotificationsOptions) -> Result<()> {
    let ctx = load_context(&options.global)?;
    let mut notifications = derive_notifications_with(&ctx.tasks, ctx.now, &ctx.rules);
    let total = notifications.len();
    apply_limit(&mut notifications, options.limit)?;

    let mut human = HumanOutput::new(format!("Notifications ({total})"));
    human.push_summary("Now", ctx.now.format("%Y-%m-%d %H:%M").to_string());
    for notification in &notifications {
        human.push_detail(notification_line(notification));
    }
    if notifications.len() < total {
        human.push_warning(format!(
            "{} more notification(s) not shown",
            total - notifications.len()
        ));
    }

    let output = NotificationsOutput {
        now: ctx.now,
        total,
        notifications,
    };
    emit_success(options.global.output(), "notifications", &output, Some(&human))
}

pub fn run_stats(options: StatsOptions) -> Result<()> {
    let ctx = load_context(&options.global)?;
    let stats = compute_statistics(&ctx.tasks);

    let mut human = HumanOutput::new("Task statistics");
    push_stats_summary(&mut human, &stats);
    human.push_detail(format!(
        "Task statuses: {}",
        format_status_counts(&stats.status_counts())
    ));

    emit_success(options.global.output(), "stats", &stats, Some(&human))
}

#[derive(serde::Serialize)]
struct TaskListOutput<'a> {
    total: usize,
    criteria: &'a FilterCriteria,
    tasks: Vec<&'a Task>,
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let criteria = FilterCriteria::parse(
        options.status.as_deref(),
        options.priority.as_deref(),
        options.search.as_deref(),
    )?;
    let ctx = load_context(&options.global)?;
    let tasks = filter_tasks(&ctx.tasks, &criteria);

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("Total", tasks.len().to_string());
    push_criteria_summary(&mut human, &criteria);
    for task in &tasks {
        human.push_detail(task_line(task, ctx.locale()));
    }
    if tasks.is_empty() {
        human.push_warning("no tasks found");
    }

    let output = TaskListOutput {
        total: tasks.len(),
        criteria: &criteria,
        tasks,
    };
    emit_success(options.global.output(), "list", &output, Some(&human))
}

#[derive(serde::Serialize)]
struct CalendarOutput<'a> {
    date: NaiveDate,
    total: usize,
    tasks: Vec<&'a Task>,
}

pub fn run_calendar(options: CalendarOptions) -> Result<()> {
    let ctx = load_context(&options.global)?;
    let date = match options.date.as_deref() {
        Some(value) => parse_date(value)?,
        None => ctx.now.date(),
    };
    let tasks = tasks_on_date(&ctx.tasks, date);

    let mut human = HumanOutput::new(format!("Tasks due {}", ctx.locale().format_date(date)));
    human.push_summary("Total", tasks.len().to_string());
    for task in &tasks {
        human.push_detail(format!("{} ({})", task.title, task.assignee));
    }

    let output = CalendarOutput {
        date,
        total: tasks.len(),
        tasks,
    };
    emit_success(options.global.output(), "calendar", &output, Some(&human))
}

pub fn run_dashboard(options: DashboardOptions) -> Result<()> {
    let criteria = FilterCriteria::parse(
        options.status.as_deref(),
        options.priority.as_deref(),
        options.search.as_deref(),
    )?;
    let selected = options.date.as_deref().map(parse_date).transpose()?;
    let ctx = load_context(&options.global)?;
    let locale = ctx.locale();
    let preview_limit = ctx.config.notifications.preview_limit;

    let mut board = Dashboard::new(ctx.tasks, ctx.now);
    board.set_rules(ctx.rules);
    board.set_criteria(criteria);
    if let Some(date) = selected {
        board.select_date(Some(date));
    }
    let view = board.recompute();

    let mut human = HumanOutput::new("Task dashboard");
    human.push_summary("Notifications", view.notifications.len().to_string());
    push_stats_summary(&mut human, &view.statistics);
    push_criteria_summary(&mut human, view.criteria);
    for notification in view.notifications.iter().take(preview_limit) {
        human.push_detail(notification_line(notification));
    }
    if view.notifications.len() > preview_limit {
        human.push_warning(format!(
            "{} more notification(s) not shown",
            view.notifications.len() - preview_limit
        ));
    }
    for task in &view.filtered {
        human.push_detail(task_line(task, locale));
    }
    if view.filtered.is_empty() {
        human.push_warning("no tasks found");
    }
    if let Some(date) = view.selected_date {
        for task in &view.on_selected_date {
            human.push_detail(format!(
                "Due {}: {} ({})",
                locale.format_date(date),
                task.title,
                task.assignee
            ));
        }
    }

    emit_success(options.global.output(), "dashboard", &view, Some(&human))
}

#[derive(serde::Serialize)]
struct CheckOutput {
    source: String,
    total: usize,
}

pub fn run_check(options: CheckOptions) -> Result<()> {
    let ctx = load_context(&options.global)?;
    let output = CheckOutput {
        source: ctx.source.describe(),
        total: ctx.tasks.len(),
    };

    let mut human = HumanOutput::new("Task file OK");
    human.push_summary("Source", output.source.clone());
    human.push_summary("Tasks", output.total.to_string());
    human.push_next_step("taskboard dashboard");

    emit_success(options.global.output(), "check", &output, Some(&human))
}

fn load_context(global: &GlobalOptions) -> Result<BoardContext> {
    let (config, config_dir) = match global.config.as_deref() {
        Some(path) => (
            Config::load(path)?,
            path.parent().map(Path::to_path_buf).unwrap_or_default(),
        ),
        None => {
            let cwd = std::env::current_dir()?;
            (Config::load_from_dir(&cwd), cwd)
        }
    };
    let now = match global.now.as_deref() {
        Some(value) => parse_now(value)?,
        None => Local::now().naive_local(),
    };

    // --tasks is relative to the working directory, tasks_file to its config file.
    let tasks_path = global
        .tasks
        .clone()
        .or_else(|| config.resolve_tasks_file(&config_dir));
    let source = match tasks_path {
        Some(path) => TaskSource::File(path),
        None => TaskSource::Sample,
    };
    let tasks = source.load()?;

    let mut rules = config.notification_rules();
    if global.auto_overdue {
        rules.overdue = OverdueRule::DueDatePassed;
    }
    // Statistics and lists see the same effective statuses as notifications.
    let tasks = match rules.overdue {
        OverdueRule::StatusOnly => tasks,
        rule => rule.apply(&tasks, now),
    };

    tracing::debug!(source = %source.describe(), tasks = tasks.len(), %now, "loaded board context");

    Ok(BoardContext {
        source,
        tasks,
        now,
        rules,
        config,
    })
}

fn parse_now(value: &str) -> Result<NaiveDateTime> {
    parse_due_date(value).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "invalid --now '{value}' (expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS])"
        ))
    })
}

fn apply_limit<T>(items: &mut Vec<T>, limit: Option<usize>) -> Result<()> {
    if let Some(limit) = limit {
        if limit == 0 {
            return Err(Error::InvalidArgument("limit must be >= 1".to_string()));
        }
        items.truncate(limit);
    }
    Ok(())
}

fn push_stats_summary(human: &mut HumanOutput, stats: &Statistics) {
    human.push_summary("Total", stats.total.to_string());
    human.push_summary("Completed", stats.completed.to_string());
    human.push_summary("In progress", stats.in_progress.to_string());
    human.push_summary("Overdue", stats.overdue.to_string());
    human.push_summary("Pending", stats.pending.to_string());
    human.push_summary("Progress", format!("{}%", stats.completion_rate));
}

fn push_criteria_summary(human: &mut HumanOutput, criteria: &FilterCriteria) {
    if criteria.is_unfiltered() {
        return;
    }
    human.push_summary("Status filter", criteria.status.to_string());
    human.push_summary("Priority filter", criteria.priority.to_string());
    if !criteria.search.is_empty() {
        human.push_summary("Search", criteria.search.clone());
    }
}

fn notification_line(notification: &Notification<'_>) -> String {
    format!(
        "[{}] {} ({})",
        notification.kind.as_str(),
        notification.message,
        notification.task.assignee
    )
}

fn task_line(task: &Task, locale: DisplayLocale) -> String {
    format!(
        "[{}][{}] {} {} ({}, due {}, {})",
        task.status,
        task.priority,
        task.id,
        task.title,
        task.assignee,
        locale.format_date(task.due_day()),
        task.category
    )
}
