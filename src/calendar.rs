//! Calendar day lookups and the display-locale date format.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::task::Task;

/// Tasks due on `date`, ignoring time of day, in source order.
///
/// Filter criteria do not apply here; the day panel always shows every task
/// due that day.
pub fn tasks_on_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|task| task.due_day() == date).collect()
}

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|err| {
        Error::InvalidArgument(format!("invalid date '{value}' (expected YYYY-MM-DD): {err}"))
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayLocale {
    #[default]
    #[serde(rename = "ru-RU")]
    RuRu,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "iso")]
    Iso,
}

impl DisplayLocale {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayLocale::RuRu => "ru-RU",
            DisplayLocale::EnUs => "en-US",
            DisplayLocale::Iso => "iso",
        }
    }

    pub fn format_date(self, date: NaiveDate) -> String {
        match self {
            DisplayLocale::RuRu => date.format("%d.%m.%Y").to_string(),
            DisplayLocale::EnUs => format!("{}/{}/{}", date.month(), date.day(), date.year()),
            DisplayLocale::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl FromStr for DisplayLocale {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "ru-RU" => Ok(DisplayLocale::RuRu),
            "en-US" => Ok(DisplayLocale::EnUs),
            "iso" => Ok(DisplayLocale::Iso),
            other => Err(Error::InvalidArgument(format!(
                "unknown locale '{other}' (expected ru-RU|en-US|iso)"
            ))),
        }
    }
}

impl fmt::Display for DisplayLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
