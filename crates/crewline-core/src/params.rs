//! Step form payloads for the project-creation wizard.
//!
//! Each wizard step hands its validated output to the controller as one of
//! these structures. Presentation layers own the in-progress editing state;
//! the controller only ever receives a complete form, validates it, and
//! merges it into the aggregate draft. Keeping the forms free of
//! framework-specific derives lets the same types back any front end.

use serde::{Deserialize, Serialize};

use crate::error::{Result, WizardError};
use crate::models::{
    ExperienceLevel, NotificationPrefs, PaymentTerms, ReplyDeadline, Schedule, SkillId,
    TimeRange, WizardStep, WorkerCount, WorkerId, WorkerSummary,
};

/// Step 1: project identity, required skills, and head count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicsForm {
    /// Project title (required)
    pub project_name: String,
    /// Site address (required)
    pub project_address: String,
    /// Category of work (required)
    pub project_type: String,
    /// Required skills; at least one
    pub required_skills: Vec<SkillId>,
    /// Number of workers needed; must be an explicit positive count
    pub worker_count: WorkerCount,
    /// Description of the work (required)
    pub work_description: String,
    /// Minimum experience level
    pub experience_level: Option<ExperienceLevel>,
}

impl BasicsForm {
    /// Validates the required fields of the basics step.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("project_name", &self.project_name)?;
        require_non_empty("project_address", &self.project_address)?;
        require_non_empty("project_type", &self.project_type)?;
        require_non_empty("work_description", &self.work_description)?;

        if self.required_skills.iter().all(|s| s.trim().is_empty()) {
            return Err(WizardError::invalid_input(
                "required_skills",
                "Select at least one required skill",
            ));
        }

        match self.worker_count {
            WorkerCount::Count(n) if n >= 1 => Ok(()),
            WorkerCount::Count(_) => Err(WizardError::invalid_input(
                "worker_count",
                "Worker count must be at least 1",
            )),
            WorkerCount::Unspecified => Err(WizardError::invalid_input(
                "worker_count",
                "Choose how many workers the project needs",
            )),
        }
    }
}

/// Step 2: dates, working days, and the daily time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleForm {
    /// When the work happens; date ordering is enforced by the
    /// [`Schedule`] constructors
    pub schedule: Schedule,
    /// Daily working window; required later for hourly payment
    pub hours: Option<TimeRange>,
}

impl ScheduleForm {
    /// Validates the schedule step.
    pub fn validate(&self) -> Result<()> {
        if let Some(days) = self.schedule.working_days() {
            if days.is_empty() {
                return Err(WizardError::invalid_input(
                    "working_days",
                    "Recurring projects need at least one working day",
                ));
            }
        }
        Ok(())
    }
}

/// Step 3: payment terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentForm {
    pub payment: PaymentTerms,
}

impl PaymentForm {
    /// Validates the payment step.
    pub fn validate(&self) -> Result<()> {
        let amount = self.payment.amount();
        if !amount.is_finite() || amount <= 0.0 {
            return Err(WizardError::invalid_input(
                "budget_range",
                "Enter a positive amount",
            ));
        }
        Ok(())
    }
}

/// Step 4: optional direct worker selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewForm {
    /// Workers to invite directly; may be empty
    pub selected_workers: Vec<WorkerId>,
    /// Denormalized summaries parallel to `selected_workers`
    pub selected_worker_details: Vec<WorkerSummary>,
}

impl CrewForm {
    /// Validates the worker-selection step.
    pub fn validate(&self) -> Result<()> {
        if self.selected_workers.len() != self.selected_worker_details.len() {
            return Err(WizardError::invalid_input(
                "selected_workers",
                "Worker ids and summaries must be parallel lists",
            ));
        }
        Ok(())
    }
}

/// Step 5: notification preferences and reply deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyForm {
    pub notifications: NotificationPrefs,
    pub reply_deadline: ReplyDeadline,
}

impl NotifyForm {
    /// Validates the notification step.
    pub fn validate(&self) -> Result<()> {
        if !self.notifications.any_enabled() {
            return Err(WizardError::invalid_input(
                "notification_methods",
                "Enable at least one notification channel",
            ));
        }
        Ok(())
    }
}

/// A completed form for exactly one wizard step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum StepForm {
    Basics(BasicsForm),
    Schedule(ScheduleForm),
    Payment(PaymentForm),
    Crew(CrewForm),
    Notify(NotifyForm),
}

impl StepForm {
    /// The wizard step this form belongs to.
    pub fn step(&self) -> WizardStep {
        match self {
            StepForm::Basics(_) => WizardStep::Basics,
            StepForm::Schedule(_) => WizardStep::Schedule,
            StepForm::Payment(_) => WizardStep::Payment,
            StepForm::Crew(_) => WizardStep::Crew,
            StepForm::Notify(_) => WizardStep::Notify,
        }
    }

    /// Validates the step-local rules for this form.
    pub fn validate(&self) -> Result<()> {
        match self {
            StepForm::Basics(form) => form.validate(),
            StepForm::Schedule(form) => form.validate(),
            StepForm::Payment(form) => form.validate(),
            StepForm::Crew(form) => form.validate(),
            StepForm::Notify(form) => form.validate(),
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(WizardError::invalid_input(
            field,
            format!("{field} must not be empty"),
        ))
    } else {
        Ok(())
    }
}
