#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Scratch directory holding a task file and optional config.
pub struct TestBoard {
    dir: TempDir,
}

impl TestBoard {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn write_tasks(&self, tasks: &[Value]) -> PathBuf {
        let contents = serde_json::to_string_pretty(&Value::Array(tasks.to_vec())).expect("json");
        self.write_file("tasks.json", &contents)
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        self.write_file(".taskboard.toml", contents)
    }

    /// Command running inside the board directory, isolated from the caller's env.
    pub fn cmd(&self) -> Command {
        let mut cmd = taskboard_cmd();
        cmd.current_dir(self.path());
        cmd
    }
}

pub fn taskboard_cmd() -> Command {
    let mut cmd = Command::cargo_bin("taskboard").expect("binary");
    cmd.env_remove("TASKBOARD_TASKS")
        .env_remove("TASKBOARD_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

pub fn task(id: &str, status: &str, priority: &str, due_date: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Task {id}"),
        "description": format!("Description of {id}"),
        "status": status,
        "priority": priority,
        "assignee": "Owner",
        "due_date": due_date,
        "category": "General",
    })
}

pub fn success_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("json output")
}

pub fn ids(values: &Value) -> Vec<String> {
    values
        .as_array()
        .expect("array")
        .iter()
        .map(|value| {
            value["id"]
                .as_str()
                .or_else(|| value["task"]["id"].as_str())
                .expect("id")
                .to_string()
        })
        .collect()
}
