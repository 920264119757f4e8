//! Data models for the project-creation wizard.
//!
//! This module contains the domain types accumulated across the wizard:
//! the aggregate [`ProjectDraft`], the tagged schedule and payment
//! configurations, the persisted [`DraftRecord`]/[`DraftMeta`] envelopes,
//! and the [`WizardStep`] cursor.

pub mod draft;
pub mod options;
pub mod payment;
pub mod record;
pub mod schedule;
pub mod step;
pub mod worker;


// Re-export all public types at the models level
pub use draft::ProjectDraft;
pub use options::{ExperienceLevel, NotificationChannel, NotificationPrefs, ReplyDeadline};
pub use payment::PaymentTerms;
pub use record::{DraftMeta, DraftRecord, DraftSnapshot};
pub use schedule::{Schedule, TimeRange, TimeRangeEdit, Weekday};
pub use step::WizardStep;
pub use worker::{SkillId, WorkerCount, WorkerId, WorkerSummary};
