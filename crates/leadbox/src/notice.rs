//! User-facing notices.
//!
//! Operations of the form and the console report their outcome as a short
//! message, the way a web page would pop a toast. The CLI prints them.

use std::fmt;

use serde::Serialize;

/// Notice shown after a successful submission.
pub const SUBMITTED: &str = "Заявка отправлена!";
/// Notice shown after a lead is deleted.
pub const DELETED: &str = "Заявка удалена";
/// Notice shown when a delete matched nothing.
pub const NOT_FOUND: &str = "Заявка не найдена";
/// Notice shown after all leads are cleared.
pub const CLEARED: &str = "Все заявки удалены";
/// Notice shown after a CSV export is written.
pub const EXPORTED: &str = "CSV файл загружен";
/// Notice shown when an export is refused for lack of data.
pub const NOTHING_TO_EXPORT: &str = "Нет заявок для экспорта";

/// Whether a notice reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    /// The operation went through.
    Success,
    /// The operation was refused.
    Error,
}

/// A message for the person operating the form or the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Outcome of the operation.
    pub level: NoticeLevel,
    /// Text to show.
    pub message: String,
}

impl Notice {
    /// A success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Whether this notice reports a refusal.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
