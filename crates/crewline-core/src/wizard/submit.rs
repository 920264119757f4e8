//! Translation of a finished draft into the submission payload, and the
//! project-creation collaborator contract.

use jiff::civil::{Date, Time};
use serde::Serialize;

use crate::error::{Result, WizardError};
use crate::estimate;
use crate::models::{
    ExperienceLevel, ProjectDraft, ReplyDeadline, Schedule, SkillId, Weekday, WorkerId,
};

/// One required skill in the submission shape.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkillRequirement {
    pub skill_id: SkillId,
    pub required_level: u8,
    pub is_mandatory: bool,
}

impl SkillRequirement {
    fn new(skill_id: SkillId) -> Self {
        Self {
            skill_id,
            required_level: 1,
            is_mandatory: true,
        }
    }
}

/// The external project-creation request shape.
///
/// Snake-case rendition of the aggregate draft, with the notification
/// toggles reduced to an upper-cased channel list and the skill ids
/// expanded into per-skill requirement records.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectPayload {
    pub project_name: String,
    pub project_address: String,
    pub project_type: String,
    pub work_description: String,
    pub experience_level: Option<ExperienceLevel>,
    pub required_workers: u32,
    pub required_skills: Vec<SkillRequirement>,
    pub time_nature: String,
    pub start_date: Date,
    pub end_date: Date,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    pub working_days: Vec<Weekday>,
    pub payment_type: String,
    pub budget_range: f64,
    pub selected_workers: Vec<WorkerId>,
    pub notification_methods: Vec<String>,
    pub reply_deadline: ReplyDeadline,
    pub estimated_total: f64,
}

impl ProjectPayload {
    /// Builds the payload from a draft whose steps have all validated.
    ///
    /// Re-checks the submission-level required fields so a payload can
    /// never leave with blanks, whatever path the session took.
    pub fn from_draft(draft: &ProjectDraft) -> Result<Self> {
        require_at_submission("project_name", &draft.project_name)?;
        require_at_submission("project_address", &draft.project_address)?;
        require_at_submission("project_type", &draft.project_type)?;
        require_at_submission("work_description", &draft.work_description)?;

        let schedule = draft.schedule.as_ref().ok_or_else(|| {
            WizardError::invalid_input("schedule", "Schedule step has not been completed")
        })?;
        let payment = draft.payment.as_ref().ok_or_else(|| {
            WizardError::invalid_input("payment", "Payment step has not been completed")
        })?;
        let reply_deadline = draft.reply_deadline.ok_or_else(|| {
            WizardError::invalid_input("reply_deadline", "Choose a reply deadline")
        })?;

        let time_nature = match schedule {
            Schedule::OneTime { .. } => "onetime",
            Schedule::Recurring { .. } => "recurring",
        };
        let working_days = schedule
            .working_days()
            .map(|days| days.iter().copied().collect())
            .unwrap_or_default();

        let breakdown = estimate::estimate(
            draft.worker_count.count(),
            Some(payment),
            Some(schedule),
            draft.hours.as_ref(),
        );

        Ok(Self {
            project_name: draft.project_name.trim().to_string(),
            project_address: draft.project_address.trim().to_string(),
            project_type: draft.project_type.trim().to_string(),
            work_description: draft.work_description.trim().to_string(),
            experience_level: draft.experience_level,
            required_workers: draft.worker_count.count(),
            required_skills: draft
                .required_skills
                .iter()
                .cloned()
                .map(SkillRequirement::new)
                .collect(),
            time_nature: time_nature.to_string(),
            start_date: schedule.start(),
            end_date: schedule.end(),
            start_time: draft.hours.map(|h| h.start()),
            end_time: draft.hours.map(|h| h.end()),
            working_days,
            payment_type: payment.as_str().to_string(),
            budget_range: payment.amount(),
            selected_workers: draft.selected_workers.clone(),
            notification_methods: draft
                .notifications
                .enabled_channels()
                .iter()
                .map(|c| c.wire_name().to_string())
                .collect(),
            reply_deadline,
            estimated_total: breakdown.total,
        })
    }
}

fn require_at_submission(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(WizardError::invalid_input(
            field,
            format!("{field} is required before submission"),
        ))
    } else {
        Ok(())
    }
}

/// Receipt returned by the project-creation collaborator on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Identifier of the created project
    pub project_id: u64,
}

/// External project-creation collaborator (REST client or equivalent).
///
/// Implementations live outside this crate; the wizard only needs a way
/// to hand over the finished payload and learn whether it was accepted.
pub trait ProjectClient: Send + Sync {
    /// Submits the payload, returning a receipt on success.
    fn create_project(&self, payload: &ProjectPayload) -> Result<SubmissionReceipt>;
}
