//! The submission form.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::Result;
use crate::lead::{Lead, LeadForm};
use crate::notice::{self, Notice};
use crate::store::RecordStore;

/// Accepts lead submissions and appends them to a store.
#[derive(Debug)]
pub struct SubmissionForm<S> {
    store: S,
}

impl<S: RecordStore> SubmissionForm<S> {
    /// Create a form writing into `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and store a submission made now.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid or the store cannot be written.
    pub fn submit(&self, form: LeadForm) -> Result<(Lead, Notice)> {
        self.submit_at(form, Utc::now())
    }

    /// Validate and store a submission made at `now`.
    ///
    /// The lead's id and timestamp both derive from `now`. An invalid form
    /// leaves the store untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid or the store cannot be written.
    pub fn submit_at(&self, form: LeadForm, now: DateTime<Utc>) -> Result<(Lead, Notice)> {
        form.validate()?;

        let lead = form.into_lead(now);
        self.store.append(lead.clone())?;

        info!("Stored lead {} from {}", lead.id, lead.email);
        Ok((lead, Notice::success(notice::SUBMITTED)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::lead::LeadId;
    use crate::store::LeadStore;
    use chrono::TimeZone;

    #[test]
    fn test_submit_appends_lead() {
        let store = LeadStore::in_memory();
        let form = SubmissionForm::new(&store);

        let (lead, notice) = form
            .submit(LeadForm::new("Иван Иванов", "@ivan", "ivan@example.com"))
            .unwrap();

        assert_eq!(notice.message, "Заявка отправлена!");
        assert!(!notice.is_error());
        assert_eq!(store.load(), vec![lead]);
    }

    #[test]
    fn test_submit_at_uses_given_instant() {
        let store = LeadStore::in_memory();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();

        let (lead, _) = SubmissionForm::new(&store)
            .submit_at(
                LeadForm::new("Anna", "anna", "anna@example.com").with_message("hi"),
                now,
            )
            .unwrap();

        assert_eq!(lead.id, LeadId(now.timestamp_millis()));
        assert_eq!(lead.timestamp, now);
        assert_eq!(lead.message, "hi");
    }

    #[test]
    fn test_padded_email_stored_clean() {
        use crate::export::{render_csv, BOM};
        use crate::locale::DisplayZone;

        let store = LeadStore::in_memory();
        SubmissionForm::new(&store)
            .submit(LeadForm::new("Anna", "@a", " anna@example.com\n"))
            .unwrap();

        let stored = store.load();
        assert_eq!(stored[0].email, "anna@example.com");

        let csv = render_csv(&stored, DisplayZone::Utc).unwrap();
        assert_eq!(csv.trim_start_matches(BOM).split('\n').count(), 2);
    }

    #[test]
    fn test_invalid_submission_not_stored() {
        let store = LeadStore::in_memory();
        let result = SubmissionForm::new(&store).submit(LeadForm::new("Anna", "anna", "nope"));

        assert!(matches!(
            result,
            Err(Error::InvalidSubmission { field: "email", .. })
        ));
        assert!(store.load().is_empty());
    }
}
