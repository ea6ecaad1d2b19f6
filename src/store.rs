//! Read-only task snapshots.
//!
//! A task file is either a bare JSON array of task records or an object
//! `{"schema_version": "taskboard.tasks.v1", "tasks": [...]}`. Every record
//! is validated on load; the engine only ever sees the resulting owned
//! `Vec<Task>`, so a file changing on disk cannot affect a pass in flight.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::task::{tasks_from_records, Task, TaskRecord};

pub const TASKS_SCHEMA_VERSION: &str = "taskboard.tasks.v1";

const SAMPLE_TASKS: &str = r#"[
  {
    "id": "1",
    "title": "Подготовить отчет по продажам",
    "description": "Анализ продаж за Q4 2024",
    "status": "in_progress",
    "priority": "high",
    "assignee": "Иванов А.А.",
    "due_date": "2025-07-30",
    "category": "Отчетность"
  },
  {
    "id": "2",
    "title": "Организовать встречу с клиентом",
    "description": "Обсуждение нового проекта",
    "status": "pending",
    "priority": "medium",
    "assignee": "Петрова М.В.",
    "due_date": "2025-07-29",
    "category": "Встречи"
  },
  {
    "id": "3",
    "title": "Обновить базу данных",
    "description": "Миграция на новую версию",
    "status": "overdue",
    "priority": "high",
    "assignee": "Сидоров П.И.",
    "due_date": "2025-07-25",
    "category": "IT"
  },
  {
    "id": "4",
    "title": "Провести аудит безопасности",
    "description": "Проверка системы безопасности",
    "status": "completed",
    "priority": "high",
    "assignee": "Козлов В.С.",
    "due_date": "2025-07-20",
    "category": "Безопасность"
  },
  {
    "id": "5",
    "title": "Написать техническую документацию",
    "description": "Документация для нового API",
    "status": "pending",
    "priority": "low",
    "assignee": "Морозова Е.Н.",
    "due_date": "2025-08-05",
    "category": "Документация"
  }
]"#;

#[derive(Deserialize)]
#[serde(untagged)]
enum TaskFile {
    Bare(Vec<Value>),
    Versioned {
        #[serde(default)]
        schema_version: Option<String>,
        tasks: Vec<Value>,
    },
}

/// Where a snapshot comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSource {
    File(PathBuf),
    Sample,
}

impl TaskSource {
    pub fn describe(&self) -> String {
        match self {
            TaskSource::File(path) => path.display().to_string(),
            TaskSource::Sample => "built-in sample".to_string(),
        }
    }

    pub fn load(&self) -> Result<Vec<Task>> {
        match self {
            TaskSource::File(path) => load_tasks(path),
            TaskSource::Sample => sample_tasks(),
        }
    }
}

pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => Error::TaskFileNotFound(path.to_path_buf()),
        _ => Error::TaskFileRead {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    let tasks = parse_tasks(&content)?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "loaded task snapshot");
    Ok(tasks)
}

pub fn parse_tasks(content: &str) -> Result<Vec<Task>> {
    let values = match serde_json::from_str::<TaskFile>(content)? {
        TaskFile::Bare(values) => values,
        TaskFile::Versioned {
            schema_version,
            tasks,
        } => {
            if let Some(version) = schema_version.as_deref() {
                if version != TASKS_SCHEMA_VERSION {
                    return Err(Error::InvalidArgument(format!(
                        "unsupported task file schema '{version}' (expected {TASKS_SCHEMA_VERSION})"
                    )));
                }
            }
            tasks
        }
    };

    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        let id = record_label(&value, index);
        let record: TaskRecord = serde_json::from_value(value).map_err(|err| Error::InvalidTask {
            id,
            reason: err.to_string(),
        })?;
        records.push(record);
    }
    tasks_from_records(records)
}

/// The five-task demo snapshot.
pub fn sample_tasks() -> Result<Vec<Task>> {
    parse_tasks(SAMPLE_TASKS)
}

fn record_label(value: &Value, index: usize) -> String {
    value
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{index}"))
}
