//! CSV export of the lead store.
//!
//! The file is meant to be opened by double-click in a spreadsheet, so it
//! starts with a UTF-8 byte-order mark and uses Russian column titles.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::lead::Lead;
use crate::locale::DisplayZone;
use crate::notice::{self, Notice};

/// UTF-8 byte-order mark prepended to every export.
pub const BOM: char = '\u{feff}';

/// Column titles of the header row.
pub const HEADER: [&str; 5] = ["Дата", "ФИО", "Telegram", "Email", "Комментарий"];

/// Result of an export attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The file was written.
    Written {
        /// Where the file landed.
        path: PathBuf,
        /// Number of data rows (header excluded).
        rows: usize,
    },
    /// There was nothing to export; no file was produced.
    Refused,
}

impl ExportOutcome {
    /// The notice to show for this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Written { .. } => Notice::success(notice::EXPORTED),
            Self::Refused => Notice::error(notice::NOTHING_TO_EXPORT),
        }
    }

    /// Path of the written file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Written { path, .. } => Some(path),
            Self::Refused => None,
        }
    }
}

/// File name for an export made at `now`: `заявки_YYYY-MM-DD.csv` (UTC date).
#[must_use]
pub fn file_name(now: DateTime<Utc>) -> String {
    format!("заявки_{}.csv", now.format("%Y-%m-%d"))
}

/// First path in `dir` for `name` that is not taken yet.
///
/// Taken names get a ` (1)`, ` (2)`, ... suffix before the extension, the way
/// browsers number repeated downloads.
fn available_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = name.rsplit_once('.').unwrap_or((name, ""));
    (1..)
        .map(|n| {
            if ext.is_empty() {
                dir.join(format!("{stem} ({n})"))
            } else {
                dir.join(format!("{stem} ({n}).{ext}"))
            }
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Wrap a cell in double quotes, doubling any quote inside it.
fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn row(lead: &Lead, zone: DisplayZone) -> String {
    let date = zone.format_date_time(lead.timestamp);
    let cells = [
        date.as_str(),
        lead.full_name.as_str(),
        lead.telegram.as_str(),
        lead.email.as_str(),
        lead.message_or_placeholder(),
    ];
    cells.iter().map(|cell| quote(cell)).collect::<Vec<_>>().join(",")
}

/// Render leads as CSV text, BOM included.
///
/// Returns `None` for an empty slice: an export without rows is refused
/// rather than producing a header-only file.
#[must_use]
pub fn render_csv(leads: &[Lead], zone: DisplayZone) -> Option<String> {
    if leads.is_empty() {
        return None;
    }

    let mut lines = Vec::with_capacity(leads.len() + 1);
    lines.push(HEADER.join(","));
    lines.extend(leads.iter().map(|lead| row(lead, zone)));

    let mut csv = String::from(BOM);
    csv.push_str(&lines.join("\n"));
    Some(csv)
}

/// Export leads into `dir`, naming the file after the date of `now`.
///
/// The directory is created if missing. An existing export from the same day
/// is kept; the new file gets a numbered name instead.
///
/// # Errors
///
/// Returns an error if the directory or the file cannot be written.
pub fn write_csv(
    dir: &Path,
    leads: &[Lead],
    now: DateTime<Utc>,
    zone: DisplayZone,
) -> Result<ExportOutcome> {
    let Some(csv) = render_csv(leads, zone) else {
        debug!("Export refused: no leads");
        return Ok(ExportOutcome::Refused);
    };

    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let name = file_name(now);
    let path = available_path(dir, &name);
    if path != dir.join(&name) {
        warn!("{} already exists, writing {}", name, path.display());
    }
    std::fs::write(&path, csv).map_err(|source| Error::ExportWrite {
        path: path.clone(),
        source,
    })?;

    info!("Exported {} lead(s) to {}", leads.len(), path.display());
    Ok(ExportOutcome::Written {
        path,
        rows: leads.len(),
    })
}
