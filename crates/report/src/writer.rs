//! Persisting rendered reports.

use ashare_core::{Error, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Writes reports under one output directory, creating it on demand.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `A股深度优化日报_<date>.md`
    pub fn daily_filename(date: NaiveDate) -> String {
        format!("A股深度优化日报_{}.md", date.format("%Y-%m-%d"))
    }

    /// `个股案例分析_<name>_<date>.md`, with path separators in `name`
    /// replaced by `_`.
    pub fn case_filename(name: &str, date: NaiveDate) -> String {
        let name: String = name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("个股案例分析_{}_{}.md", name, date.format("%Y-%m-%d"))
    }

    /// Write `content` to `filename`, replacing any previous file.
    ///
    /// `filename` must be a single plain file name inside the output directory.
    pub fn write(&self, filename: &str, content: &str) -> Result<PathBuf> {
        let mut components = Path::new(filename).components();
        if !matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
            || filename.contains('\\')
        {
            return Err(Error::data(format!("invalid report file name: {}", filename)));
        }

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(filename);
        fs::write(&path, content)?;
        info!(path = %path.display(), bytes = content.len(), "Report written");
        Ok(path)
    }

    pub fn write_daily(&self, date: NaiveDate, content: &str) -> Result<PathBuf> {
        self.write(&Self::daily_filename(date), content)
    }

    pub fn write_case(&self, name: &str, date: NaiveDate, content: &str) -> Result<PathBuf> {
        self.write(&Self::case_filename(name, date), content)
    }
}
