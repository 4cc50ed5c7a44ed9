//! Report rendering. Every builder here is a pure function from data to a
//! string; `write_report` is the only side effect.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::errors::AppError;

pub mod console;
pub mod daily;
pub mod hot_jobs;
pub mod remote;

pub use console::format_hot_jobs;
pub use daily::{render_daily_report, DailyReportInput};
pub use hot_jobs::render_hot_jobs_section;
pub use remote::render_remote_report;

/// A labelled link; `url` may be empty for plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkView {
    pub label: String,
    pub url: String,
}

impl LinkView {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// "1 job", "3 jobs".
pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Default report file: `<dir>/<kind>-<date>.html`.
pub fn report_path(dir: &Path, kind: &str, date: NaiveDate) -> PathBuf {
    dir.join(format!("{kind}-{}.html", date.format("%Y-%m-%d")))
}

/// Writes `html` to `path`, creating parent directories.
pub fn write_report(path: &Path, html: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    info!("Report written to {}", path.display());
    Ok(())
}
