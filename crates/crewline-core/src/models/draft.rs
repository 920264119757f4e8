//! The aggregate project-under-construction record.

use serde::{Deserialize, Serialize};

use super::{
    ExperienceLevel, NotificationPrefs, PaymentTerms, ReplyDeadline, Schedule, SkillId,
    TimeRange, WorkerCount, WorkerId, WorkerSummary,
};

/// The single mutable project record accumulated across the wizard steps.
///
/// Owned exclusively by the wizard controller for the lifetime of one
/// session. Steps never mutate it directly; each validated step form is
/// merged in without disturbing fields owned by other steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectDraft {
    /// Project title shown to workers
    pub project_name: String,
    /// Street address or site location
    pub project_address: String,
    /// Category of work (e.g. construction, moving, cleaning)
    pub project_type: String,
    /// Required skills, unique and order-preserving for display
    pub required_skills: Vec<SkillId>,
    /// Number of workers needed
    pub worker_count: WorkerCount,
    /// Free-form description of the work
    pub work_description: String,
    /// Minimum experience level
    pub experience_level: Option<ExperienceLevel>,
    /// When the work happens; set once the schedule step validates
    pub schedule: Option<Schedule>,
    /// Daily working window; relevant for hourly payment
    pub hours: Option<TimeRange>,
    /// How workers are paid; set once the payment step validates
    pub payment: Option<PaymentTerms>,
    /// Workers invited directly, if any
    pub selected_workers: Vec<WorkerId>,
    /// Denormalized summaries parallel to `selected_workers`
    pub selected_worker_details: Vec<WorkerSummary>,
    /// Per-channel notification toggles
    pub notifications: NotificationPrefs,
    /// How long invitations stay open
    pub reply_deadline: Option<ReplyDeadline>,
}

impl ProjectDraft {
    /// True when the draft carries anything worth persisting.
    pub fn has_content(&self) -> bool {
        !self.project_name.trim().is_empty()
    }

    /// Display name for draft listings.
    pub fn display_name(&self) -> &str {
        let name = self.project_name.trim();
        if name.is_empty() {
            "Untitled project"
        } else {
            name
        }
    }

    /// Replaces the skill list, dropping duplicates while preserving the
    /// first occurrence order.
    pub fn set_skills(&mut self, skills: Vec<SkillId>) {
        let mut unique: Vec<SkillId> = Vec::with_capacity(skills.len());
        for skill in skills {
            if !unique.contains(&skill) {
                unique.push(skill);
            }
        }
        self.required_skills = unique;
    }
}
