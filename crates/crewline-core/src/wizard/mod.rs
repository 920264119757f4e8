//! The wizard controller: step sequencing, draft ownership, and
//! submission.
//!
//! The controller owns the aggregate [`ProjectDraft`] exclusively for the
//! lifetime of one session. Steps hand it validated forms through
//! [`Wizard::next`]; each form merges into the aggregate without
//! disturbing fields owned by other steps. In the background a single
//! autosave schedule snapshots the session on a fixed interval, and on
//! the final step the aggregate is translated into the external
//! submission shape and handed to the [`ProjectClient`] collaborator.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::warn;
use tokio::task;

use crate::error::{Result, WizardError};
use crate::estimate::{self, CostBreakdown};
use crate::models::{DraftSnapshot, ProjectDraft, WizardStep};
use crate::params::StepForm;
use crate::store::{AutosaveHandle, DraftStore};

pub mod builder;
pub mod submit;

#[cfg(test)]
mod tests;

pub use builder::WizardBuilder;
pub use submit::{ProjectClient, ProjectPayload, SkillRequirement, SubmissionReceipt};

/// Interval between autosave ticks unless configured otherwise.
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Outcome of a forward step transition.
#[derive(Debug, PartialEq)]
pub enum NextAction {
    /// The wizard advanced to the given step.
    Advanced(WizardStep),
    /// The final step completed and the project was submitted.
    Submitted(SubmissionReceipt),
}

/// Outcome of a backward step transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// The wizard moved back to the given step.
    MovedTo(WizardStep),
    /// Already on the first step; the caller should run the exit flow.
    ExitRequested,
}

/// The project-creation wizard session.
pub struct Wizard {
    draft: ProjectDraft,
    current_step: WizardStep,
    completed: BTreeSet<WizardStep>,
    draft_id: Option<String>,
    store: DraftStore,
    client: Arc<dyn ProjectClient>,
    autosave_interval: Duration,
    autosave: Option<AutosaveHandle>,
    shared: Arc<Mutex<DraftSnapshot>>,
}

impl Wizard {
    pub(crate) fn new(
        store: DraftStore,
        client: Arc<dyn ProjectClient>,
        autosave_interval: Duration,
        draft: ProjectDraft,
        current_step: WizardStep,
        completed: BTreeSet<WizardStep>,
        draft_id: Option<String>,
    ) -> Self {
        let shared = Arc::new(Mutex::new(DraftSnapshot {
            data: draft.clone(),
            current_step,
            completed_steps: completed.clone(),
        }));
        Self {
            draft,
            current_step,
            completed,
            draft_id,
            store,
            client,
            autosave_interval,
            autosave: None,
            shared,
        }
    }

    /// The step the wizard is currently on.
    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    /// Steps whose validation has already passed this session.
    pub fn completed_steps(&self) -> &BTreeSet<WizardStep> {
        &self.completed
    }

    /// Read-only view of the aggregate record.
    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    /// Identifier of the persisted draft backing this session, if any.
    pub fn draft_id(&self) -> Option<&str> {
        self.draft_id.as_deref()
    }

    /// The savable state of the session right now.
    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            data: self.draft.clone(),
            current_step: self.current_step,
            completed_steps: self.completed.clone(),
        }
    }

    /// Running cost estimate over the current aggregate; zero until the
    /// payment step has data.
    pub fn estimate(&self) -> CostBreakdown {
        estimate::estimate(
            self.draft.worker_count.count(),
            self.draft.payment.as_ref(),
            self.draft.schedule.as_ref(),
            self.draft.hours.as_ref(),
        )
    }

    /// True when leaving now would lose meaningful work: a named project
    /// or any completed step.
    pub fn has_unsaved_work(&self) -> bool {
        self.draft.has_content() || !self.completed.is_empty()
    }

    /// Validates and merges a step form, then advances the wizard.
    ///
    /// The form must belong to the current step. On the final step the
    /// session is submitted instead of advancing; a submission failure
    /// leaves the wizard on the final step with all state intact so the
    /// user can retry.
    pub async fn next(&mut self, form: StepForm) -> Result<NextAction> {
        if form.step() != self.current_step {
            return Err(WizardError::invalid_input(
                "step",
                format!(
                    "Received data for step {} while on step {}",
                    form.step().index(),
                    self.current_step.index()
                ),
            ));
        }
        form.validate()?;
        self.merge(form);
        self.completed.insert(self.current_step);

        match self.current_step.next() {
            Some(next) => {
                self.current_step = next;
                self.sync_shared();
                Ok(NextAction::Advanced(next))
            }
            None => {
                self.sync_shared();
                let receipt = self.submit().await?;
                Ok(NextAction::Submitted(receipt))
            }
        }
    }

    /// Moves one step back, or requests the exit flow from the first step.
    pub fn back(&mut self) -> BackAction {
        match self.current_step.prev() {
            Some(prev) => {
                self.current_step = prev;
                self.sync_shared();
                BackAction::MovedTo(prev)
            }
            None => BackAction::ExitRequested,
        }
    }

    /// Jumps backward to an already-completed step.
    ///
    /// Forward jumps and jumps to incomplete steps are silent no-ops;
    /// returns whether the cursor moved.
    pub fn jump_to(&mut self, step: WizardStep) -> bool {
        if step < self.current_step && self.completed.contains(&step) {
            self.current_step = step;
            self.sync_shared();
            true
        } else {
            false
        }
    }

    /// Explicitly persists the session as a draft, returning the id used.
    ///
    /// Unlike autosave ticks, failures here surface to the caller.
    pub async fn save_draft(&mut self) -> Result<String> {
        let store = self.store.clone();
        let snapshot = self.snapshot();
        let id = self.draft_id.clone();
        let saved = task::spawn_blocking(move || store.save(&snapshot, id.as_deref()))
            .await
            .map_err(join_error)??;
        self.draft_id = Some(saved.clone());
        Ok(saved)
    }

    /// Starts the session's single autosave schedule. No-op if already
    /// running.
    pub async fn start_autosave(&mut self) {
        if self.autosave.is_some() {
            return;
        }
        self.sync_shared();
        let shared = Arc::clone(&self.shared);
        let handle = self
            .store
            .schedule_autosave(
                move || lock_cell(&shared).clone(),
                self.draft_id.clone(),
                self.autosave_interval,
            )
            .await;
        self.draft_id = Some(handle.draft_id().to_string());
        self.autosave = Some(handle);
    }

    /// Tears the session down: stops autosave after one final flush.
    ///
    /// Idempotent; call when the user leaves with their draft kept.
    pub async fn close(&mut self) -> Result<()> {
        if let Some(mut handle) = self.autosave.take() {
            handle.cancel().await?;
        }
        Ok(())
    }

    /// Discards the session: stops autosave without flushing and deletes
    /// any persisted draft.
    pub async fn discard(&mut self) -> Result<()> {
        if let Some(mut handle) = self.autosave.take() {
            handle.abort().await;
        }
        if let Some(id) = self.draft_id.take() {
            let store = self.store.clone();
            task::spawn_blocking(move || store.delete(&id))
                .await
                .map_err(join_error)??;
        }
        Ok(())
    }

    async fn submit(&mut self) -> Result<SubmissionReceipt> {
        let payload = ProjectPayload::from_draft(&self.draft)?;
        let client = Arc::clone(&self.client);
        let receipt = task::spawn_blocking(move || client.create_project(&payload))
            .await
            .map_err(join_error)??;

        // The draft only goes away once the submission actually succeeded.
        if let Some(mut handle) = self.autosave.take() {
            handle.abort().await;
        }
        if let Some(id) = self.draft_id.take() {
            let store = self.store.clone();
            if let Err(e) = task::spawn_blocking(move || store.delete(&id))
                .await
                .map_err(join_error)?
            {
                warn!("Failed to delete submitted draft: {e}");
            }
        }
        Ok(receipt)
    }

    fn merge(&mut self, form: StepForm) {
        match form {
            StepForm::Basics(form) => {
                self.draft.project_name = form.project_name;
                self.draft.project_address = form.project_address;
                self.draft.project_type = form.project_type;
                self.draft.set_skills(form.required_skills);
                self.draft.worker_count = form.worker_count;
                self.draft.work_description = form.work_description;
                self.draft.experience_level = form.experience_level;
            }
            StepForm::Schedule(form) => {
                self.draft.schedule = Some(form.schedule);
                self.draft.hours = form.hours;
            }
            StepForm::Payment(form) => {
                self.draft.payment = Some(form.payment);
            }
            StepForm::Crew(form) => {
                self.draft.selected_workers = form.selected_workers;
                self.draft.selected_worker_details = form.selected_worker_details;
            }
            StepForm::Notify(form) => {
                self.draft.notifications = form.notifications;
                self.draft.reply_deadline = Some(form.reply_deadline);
            }
        }
    }

    fn sync_shared(&self) {
        *lock_cell(&self.shared) = DraftSnapshot {
            data: self.draft.clone(),
            current_step: self.current_step,
            completed_steps: self.completed.clone(),
        };
    }
}

fn lock_cell(cell: &Mutex<DraftSnapshot>) -> MutexGuard<'_, DraftSnapshot> {
    cell.lock().unwrap_or_else(|e| e.into_inner())
}

fn join_error(e: tokio::task::JoinError) -> WizardError {
    WizardError::Configuration {
        message: format!("Task join error: {e}"),
    }
}
