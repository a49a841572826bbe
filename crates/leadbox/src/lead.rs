//! Lead records and the submission form that produces them.
//!
//! A [`Lead`] is one course-enrollment inquiry. Leads are created once from a
//! validated [`LeadForm`] and never mutated afterwards; the store only ever
//! appends, filters out, or discards them.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::locale::DisplayZone;

/// Placeholder rendered in place of an empty message.
pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "-";

/// Identifier of a lead: its creation time in Unix milliseconds.
///
/// Two submissions within the same millisecond get the same id. Nothing
/// guards against that; deleting such an id removes both records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub i64);

impl LeadId {
    /// Derive an id from a creation instant.
    #[must_use]
    pub fn from_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis())
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for LeadId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A stored lead record.
///
/// Serialized with camelCase keys:
/// `{id, fullName, telegram, email, message, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Unique (in practice) identifier.
    pub id: LeadId,
    /// Full name of the person.
    pub full_name: String,
    /// Telegram handle, with or without a leading `@`.
    pub telegram: String,
    /// Contact email address.
    pub email: String,
    /// Free-form comment, possibly empty.
    #[serde(default)]
    pub message: String,
    /// When the lead was submitted.
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Writes timestamps as `2024-01-15T10:30:00.000Z`.
fn serialize_timestamp<S: Serializer>(
    at: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl Lead {
    /// The message, or a dash when none was left.
    #[must_use]
    pub fn message_or_placeholder(&self) -> &str {
        if self.message.is_empty() {
            EMPTY_MESSAGE_PLACEHOLDER
        } else {
            &self.message
        }
    }

    /// Link to the person's Telegram profile.
    #[must_use]
    pub fn telegram_url(&self) -> String {
        format!("https://t.me/{}", self.telegram.replacen('@', "", 1))
    }

    /// `mailto:` link for the lead's email.
    #[must_use]
    pub fn mailto_url(&self) -> String {
        format!("mailto:{}", self.email)
    }

    /// Whether the lead was submitted on `date` as seen in `zone`.
    #[must_use]
    pub fn is_on(&self, date: NaiveDate, zone: DisplayZone) -> bool {
        zone.localize(self.timestamp).date_naive() == date
    }
}

/// Field values as typed into the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    /// Full name (required).
    pub full_name: String,
    /// Telegram handle (required).
    pub telegram: String,
    /// Email address (required, must look like an address).
    pub email: String,
    /// Optional comment.
    pub message: String,
}

/// Same shape a browser `type=email` input accepts.
fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("Invalid email pattern")
    })
}

/// Value an email input submits: line breaks removed, then ASCII
/// whitespace trimmed from both ends.
fn sanitize_email(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\r' | '\n'))
        .collect::<String>()
        .trim_matches(|c: char| c.is_ascii_whitespace())
        .to_string()
}

impl LeadForm {
    /// Create a form with the required fields and an empty message.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        telegram: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            telegram: telegram.into(),
            email: email.into(),
            message: String::new(),
        }
    }

    /// Attach a comment.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Check the form constraints.
    ///
    /// Required fields only have to be non-empty. The email is checked after
    /// sanitizing, so surrounding whitespace and line breaks do not count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSubmission`] naming the first field that is
    /// empty, or the email field when it is not address-shaped.
    pub fn validate(&self) -> Result<()> {
        let email = sanitize_email(&self.email);
        for (field, value) in [
            ("full name", self.full_name.as_str()),
            ("telegram", self.telegram.as_str()),
            ("email", email.as_str()),
        ] {
            if value.is_empty() {
                return Err(Error::invalid_submission(field, "must not be empty"));
            }
        }

        if !email_pattern().is_match(&email) {
            return Err(Error::invalid_submission(
                "email",
                format!("'{email}' is not a valid email address"),
            ));
        }

        Ok(())
    }

    /// Turn the form into a lead created at `at`.
    ///
    /// The email is stored sanitized; the other fields are stored as typed.
    #[must_use]
    pub fn into_lead(self, at: DateTime<Utc>) -> Lead {
        Lead {
            id: LeadId::from_timestamp(at),
            full_name: self.full_name,
            telegram: self.telegram,
            email: sanitize_email(&self.email),
            message: self.message,
            timestamp: at,
        }
    }
}
