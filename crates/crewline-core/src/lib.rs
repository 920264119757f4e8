//! Core library for the Crewline project-creation wizard.
//!
//! This crate provides the company-side wizard subsystem of the Crewline
//! gig-labor marketplace: the five-step state machine that accumulates a
//! project record, the draft store that persists resumable sessions with
//! periodic autosave, and the pure cost estimator that derives a running
//! wage/cost breakdown from the payment configuration.
//!
//! Rendering, navigation, and the REST client are external collaborators;
//! the wizard consumes them through the [`params::StepForm`] inputs and
//! the [`wizard::ProjectClient`] trait.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use crewline_core::params::{BasicsForm, StepForm};
//! use crewline_core::wizard::ProjectClient;
//! use crewline_core::{DraftStore, MemoryKeyValue, WizardBuilder};
//!
//! # fn client() -> Arc<dyn ProjectClient> { unimplemented!() }
//! # async fn example() -> crewline_core::Result<()> {
//! let store = DraftStore::new(Arc::new(MemoryKeyValue::new()));
//! let mut wizard = WizardBuilder::new()
//!     .with_store(store)
//!     .with_client(client())
//!     .build()
//!     .await?;
//!
//! // Persist in-progress work every 30 seconds in the background.
//! wizard.start_autosave().await;
//!
//! // Each screen hands its validated output to the controller.
//! let basics = BasicsForm {
//!     project_name: "Warehouse crew".to_string(),
//!     ..Default::default()
//! };
//! let _ = wizard.next(StepForm::Basics(basics)).await;
//!
//! // Show the running total next to the form.
//! let breakdown = wizard.estimate();
//! println!("estimated total: {:.2}", breakdown.total);
//!
//! wizard.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod estimate;
pub mod models;
pub mod params;
pub mod store;
pub mod wizard;

// Re-export commonly used types
pub use error::{Result, WizardError};
pub use estimate::{CostBreakdown, SERVICE_FEE_RATE};
pub use models::{
    DraftMeta, DraftRecord, DraftSnapshot, ExperienceLevel, NotificationChannel,
    NotificationPrefs, PaymentTerms, ProjectDraft, ReplyDeadline, Schedule, TimeRange,
    TimeRangeEdit, Weekday, WizardStep, WorkerCount, WorkerSummary,
};
pub use store::{
    AutosaveHandle, DraftStore, KeyValue, MemoryKeyValue, SqliteKeyValue, MAX_DRAFTS,
};
pub use wizard::{
    BackAction, NextAction, ProjectClient, ProjectPayload, SkillRequirement,
    SubmissionReceipt, Wizard, WizardBuilder, DEFAULT_AUTOSAVE_INTERVAL,
};
