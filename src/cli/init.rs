//! taskboard init command implementation
//!
//! Writes a default `.taskboard.toml` so the settings are discoverable.

use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};

#[derive(serde::Serialize)]
struct InitReport {
    config: PathBuf,
    created: bool,
}

pub fn run(config: Option<PathBuf>, json: bool, quiet: bool) -> Result<()> {
    let config_path = match config {
        Some(path) => path,
        None => std::env::current_dir()?.join(CONFIG_FILE),
    };

    let created = ensure_config(&config_path)?;
    let report = InitReport {
        config: config_path.clone(),
        created,
    };

    let header = if created {
        "taskboard init: wrote default config"
    } else {
        "taskboard init: nothing to do"
    };
    let mut human = HumanOutput::new(header);
    human.push_summary("config", config_path.display().to_string());
    human.push_summary("created", if created { "yes" } else { "no" });
    human.push_next_step("taskboard check");

    emit_success(OutputOptions { json, quiet }, "init", &report, Some(&human))
}

fn ensure_config(path: &Path) -> Result<bool> {
    if path.exists() {
        if !path.is_file() {
            return Err(Error::InvalidConfig(format!(
                "{} exists but is not a file",
                path.display()
            )));
        }
        return Ok(false);
    }

    Config::default().save(path)?;
    tracing::debug!(path = %path.display(), "wrote default config");
    Ok(true)
}
