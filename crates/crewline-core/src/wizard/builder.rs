//! Builder for creating and configuring wizard sessions.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::task;

use super::{ProjectClient, Wizard, DEFAULT_AUTOSAVE_INTERVAL};
use crate::error::{Result, WizardError};
use crate::models::{ProjectDraft, WizardStep};
use crate::store::DraftStore;

/// Builder for creating and configuring [`Wizard`] sessions.
pub struct WizardBuilder {
    store: Option<DraftStore>,
    client: Option<Arc<dyn ProjectClient>>,
    draft_id: Option<String>,
    autosave_interval: Duration,
}

impl WizardBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            store: None,
            client: None,
            draft_id: None,
            autosave_interval: DEFAULT_AUTOSAVE_INTERVAL,
        }
    }

    /// Uses the given draft store instead of the default sqlite store at
    /// the XDG data path.
    pub fn with_store(mut self, store: DraftStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the project-creation collaborator (required).
    pub fn with_client(mut self, client: Arc<dyn ProjectClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Resumes from a persisted draft. An absent or corrupt draft falls
    /// back to a fresh session rather than failing.
    pub fn with_draft_id(mut self, draft_id: impl Into<String>) -> Self {
        self.draft_id = Some(draft_id.into());
        self
    }

    /// Overrides the autosave interval.
    pub fn with_autosave_interval(mut self, interval: Duration) -> Self {
        self.autosave_interval = interval;
        self
    }

    /// Builds the configured wizard session, hydrating from the draft
    /// store when a draft id was supplied.
    ///
    /// # Errors
    ///
    /// Returns `WizardError::Configuration` if no client was provided,
    /// and storage errors if the default store cannot be opened.
    pub async fn build(self) -> Result<Wizard> {
        let client = self.client.ok_or_else(|| WizardError::Configuration {
            message: "A project client is required to build a wizard".to_string(),
        })?;

        let store = match self.store {
            Some(store) => store,
            None => task::spawn_blocking(DraftStore::open_default)
                .await
                .map_err(|e| WizardError::Configuration {
                    message: format!("Task join error: {e}"),
                })??,
        };

        let (draft, current_step, completed, draft_id) = match self.draft_id {
            Some(id) => {
                let load_store = store.clone();
                let load_id = id.clone();
                let record = task::spawn_blocking(move || load_store.load(&load_id))
                    .await
                    .map_err(|e| WizardError::Configuration {
                        message: format!("Task join error: {e}"),
                    })?;
                match record {
                    Some(record) => (
                        record.data,
                        record.current_step,
                        record.completed_steps,
                        Some(id),
                    ),
                    None => {
                        warn!("Draft {id} not found; starting a fresh session");
                        fresh_session()
                    }
                }
            }
            None => fresh_session(),
        };

        Ok(Wizard::new(
            store,
            client,
            self.autosave_interval,
            draft,
            current_step,
            completed,
            draft_id,
        ))
    }
}

impl Default for WizardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

type SessionState = (
    ProjectDraft,
    WizardStep,
    BTreeSet<WizardStep>,
    Option<String>,
);

fn fresh_session() -> SessionState {
    (
        ProjectDraft::default(),
        WizardStep::FIRST,
        BTreeSet::new(),
        None,
    )
}
