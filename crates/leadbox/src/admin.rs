//! The admin console.
//!
//! Lists submitted leads and offers the destructive operations: deleting one
//! lead, clearing all of them (after an explicit confirmation), and exporting
//! a CSV snapshot.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::export::{self, ExportOutcome};
use crate::lead::{Lead, LeadId};
use crate::locale::DisplayZone;
use crate::notice::{self, Notice};
use crate::store::RecordStore;

/// Question asked before clearing all leads.
pub const CLEAR_ALL_PROMPT: &str = "Удалить все заявки? Это действие нельзя отменить.";

/// Shown in place of a table when the store is empty.
pub const EMPTY_LIST_TEXT: &str = "Пока нет заявок";

/// Asks the operator to confirm a destructive action.
pub trait Confirm {
    /// Return `true` to proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Counters shown above the lead list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// All stored leads.
    pub total: usize,
    /// Leads submitted on the current day.
    pub today: usize,
}

/// Read and maintenance view over a lead store.
#[derive(Debug)]
pub struct AdminConsole<S> {
    store: S,
    zone: DisplayZone,
}

impl<S: RecordStore> AdminConsole<S> {
    /// Create a console over `store`, presenting times in `zone`.
    #[must_use]
    pub fn new(store: S, zone: DisplayZone) -> Self {
        Self { store, zone }
    }

    /// Zone used for dates shown by this console.
    #[must_use]
    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// All leads in submission order.
    #[must_use]
    pub fn applications(&self) -> Vec<Lead> {
        self.store.load()
    }

    /// Total and same-day counts as of `now`.
    #[must_use]
    pub fn summary(&self, now: DateTime<Utc>) -> Summary {
        let leads = self.store.load();
        let today = self.zone.date_of(now);
        Summary {
            total: leads.len(),
            today: leads.iter().filter(|l| l.is_on(today, self.zone)).count(),
        }
    }

    /// Delete the lead with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn delete(&self, id: LeadId) -> Result<Notice> {
        if self.store.remove_by_id(id)? {
            Ok(Notice::success(notice::DELETED))
        } else {
            debug!("No lead with id {}", id);
            Ok(Notice::error(notice::NOT_FOUND))
        }
    }

    /// Clear every lead once `confirm` agrees.
    ///
    /// Returns `None` when the operator declined; the store is left as is.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear_all(&self, confirm: &mut impl Confirm) -> Result<Option<Notice>> {
        if !confirm.confirm(CLEAR_ALL_PROMPT) {
            info!("Clearing all leads declined");
            return Ok(None);
        }
        self.store.clear()?;
        Ok(Some(Notice::success(notice::CLEARED)))
    }

    /// Export all leads as CSV into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the export file cannot be written.
    pub fn export_csv(&self, dir: &Path, now: DateTime<Utc>) -> Result<ExportOutcome> {
        export::write_csv(dir, &self.store.load(), now, self.zone)
    }

    /// Render leads as an aligned text table.
    #[must_use]
    pub fn render_table(&self, leads: &[Lead]) -> String {
        render_table(leads, self.zone)
    }

    /// Render leads one per line with contact links.
    #[must_use]
    pub fn render_plain(&self, leads: &[Lead]) -> String {
        render_plain(leads, self.zone)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

/// Render leads as a text table with one row per lead.
///
/// Long comments are cut to keep rows on one line.
#[must_use]
pub fn render_table(leads: &[Lead], zone: DisplayZone) -> String {
    if leads.is_empty() {
        return EMPTY_LIST_TEXT.to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<13}  {:<17}  {:<24}  {:<16}  {:<28}  Комментарий",
        "ID", "Дата и время", "ФИО", "Telegram", "Email"
    );
    for lead in leads {
        let _ = writeln!(
            out,
            "{:<13}  {:<17}  {:<24}  {:<16}  {:<28}  {}",
            lead.id,
            zone.format_date_time_short(lead.timestamp),
            truncate(&lead.full_name, 24),
            truncate(&lead.telegram, 16),
            truncate(&lead.email, 28),
            truncate(lead.message_or_placeholder(), 40),
        );
    }
    out
}

/// Render leads one per line, with Telegram and `mailto:` links.
#[must_use]
pub fn render_plain(leads: &[Lead], zone: DisplayZone) -> String {
    if leads.is_empty() {
        return EMPTY_LIST_TEXT.to_string();
    }

    let mut out = String::new();
    for lead in leads {
        let _ = writeln!(
            out,
            "[{}] {} | {} | {} | {} | {}",
            lead.id,
            zone.format_date_time_short(lead.timestamp),
            lead.full_name,
            lead.telegram_url(),
            lead.mailto_url(),
            lead.message_or_placeholder()
        );
    }
    out
}
