//! `leadbox` - Local lead capture for a course landing page
//!
//! Submitted applications are appended to a single JSON array kept under one
//! key of a local key-value store. The [`SubmissionForm`] writes to it, the
//! [`AdminConsole`] reads, prunes and exports it. Both get the same
//! [`RecordStore`] handle injected; an in-memory backend stands in for the
//! `SQLite` one in tests.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod admin;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod lead;
pub mod locale;
pub mod logging;
pub mod notice;
pub mod storage;
pub mod store;

pub use admin::{AdminConsole, Confirm, Summary};
pub use config::Config;
pub use error::{Error, Result};
pub use export::ExportOutcome;
pub use form::SubmissionForm;
pub use lead::{Lead, LeadForm, LeadId};
pub use locale::DisplayZone;
pub use logging::init_logging;
pub use notice::{Notice, NoticeLevel};
pub use storage::{KeyValueBackend, MemoryBackend, SqliteBackend};
pub use store::{LeadStore, RecordStore};
