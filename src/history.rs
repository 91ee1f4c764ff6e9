use chrono::Local;
use csv::WriterBuilder;
use directories::ProjectDirs;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use crate::quiz::Session;

/// One line of the result log: a completed session boiled down to what the
/// user would want to see in a history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub date: String,
    pub categories: String,
    pub difficulties: String,
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub letter: char,
}

impl SessionRecord {
    /// Snapshots a session; `None` unless the session has completed.
    pub fn from_session(session: &Session) -> Option<Self> {
        let result = session.final_result()?;
        Some(Self {
            date: Local::now().format("%c").to_string(),
            categories: session.filters().category_label(),
            difficulties: session.filters().difficulty_label(),
            score: session.score(),
            total: session.total_questions(),
            percentage: result.percentage,
            letter: result.letter,
        })
    }
}

/// Append-only CSV log of finished sessions under the config dir.
/// Writing is best-effort; a failed append never fails the session.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "kwiz") {
            pd.config_dir().join("history.csv")
        } else {
            PathBuf::from("kwiz_history.csv")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn append(&self, record: &SessionRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // If the log doesn't exist yet, we need to emit a header
        let needs_header = !self.path.exists();

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        if needs_header {
            writer
                .write_record([
                    "date",
                    "categories",
                    "difficulties",
                    "score",
                    "total",
                    "percentage",
                    "letter",
                ])
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        }

        writer
            .write_record([
                record.date.as_str(),
                record.categories.as_str(),
                record.difficulties.as_str(),
                &record.score.to_string(),
                &record.total.to_string(),
                &record.percentage.to_string(),
                &record.letter.to_string(),
            ])
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        writer.flush()
    }
}
