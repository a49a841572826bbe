//! Russian-locale date rendering.
//!
//! Leads are stored in UTC. Everything shown to an admin (the table, the CSV
//! date column, the "today" counter) is rendered in a [`DisplayZone`], which
//! is the machine's local zone unless configured otherwise.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Utc};

/// `toLocaleString('ru-RU')` layout: `15.01.2024, 13:30:00`.
pub const DATE_TIME_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Table layout without seconds: `15.01.2024, 13:30`.
pub const DATE_TIME_SHORT_FORMAT: &str = "%d.%m.%Y, %H:%M";

/// Time zone used to present lead timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// The zone of the machine running leadbox.
    #[default]
    Local,
    /// Coordinated universal time.
    Utc,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Build a zone from an offset in minutes east of UTC.
    ///
    /// Returns `None` when the offset is outside ±24 hours.
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(Self::Fixed)
    }

    /// Convert a UTC instant into this zone.
    #[must_use]
    pub fn localize(self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Self::Local => at.with_timezone(&Local).into(),
            Self::Utc => at.into(),
            Self::Fixed(offset) => at.with_timezone(&offset),
        }
    }

    /// The calendar date of `now` in this zone.
    #[must_use]
    pub fn date_of(self, now: DateTime<Utc>) -> NaiveDate {
        self.localize(now).date_naive()
    }

    /// Render with seconds, as used in CSV exports.
    #[must_use]
    pub fn format_date_time(self, at: DateTime<Utc>) -> String {
        self.localize(at).format(DATE_TIME_FORMAT).to_string()
    }

    /// Render without seconds, as used in listings.
    #[must_use]
    pub fn format_date_time_short(self, at: DateTime<Utc>) -> String {
        self.localize(at).format(DATE_TIME_SHORT_FORMAT).to_string()
    }
}
