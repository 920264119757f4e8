//! Wizard step cursor.

use serde::{Deserialize, Serialize};

/// The five ordered steps of the project-creation wizard.
///
/// Serialized as its 1-based index so persisted drafts carry a plain
/// integer cursor.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    /// Project basics: name, location, skills, head count, description
    Basics,
    /// Dates, working days, and daily hours
    Schedule,
    /// Payment terms and running cost estimate
    Payment,
    /// Optional direct worker selection
    Crew,
    /// Notification preferences and final submission
    Notify,
}

impl WizardStep {
    /// First step of the wizard.
    pub const FIRST: WizardStep = WizardStep::Basics;

    /// Final step of the wizard.
    pub const LAST: WizardStep = WizardStep::Notify;

    /// 1-based position of this step.
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::Basics => 1,
            WizardStep::Schedule => 2,
            WizardStep::Payment => 3,
            WizardStep::Crew => 4,
            WizardStep::Notify => 5,
        }
    }

    /// The following step, if any.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Basics => Some(WizardStep::Schedule),
            WizardStep::Schedule => Some(WizardStep::Payment),
            WizardStep::Payment => Some(WizardStep::Crew),
            WizardStep::Crew => Some(WizardStep::Notify),
            WizardStep::Notify => None,
        }
    }

    /// The preceding step, if any.
    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Basics => None,
            WizardStep::Schedule => Some(WizardStep::Basics),
            WizardStep::Payment => Some(WizardStep::Schedule),
            WizardStep::Crew => Some(WizardStep::Payment),
            WizardStep::Notify => Some(WizardStep::Crew),
        }
    }

    /// Human-readable step title for display.
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Basics => "Project Basics",
            WizardStep::Schedule => "Schedule",
            WizardStep::Payment => "Payment",
            WizardStep::Crew => "Select Workers",
            WizardStep::Notify => "Notifications",
        }
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::FIRST
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.index()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(index: u8) -> std::result::Result<Self, Self::Error> {
        match index {
            1 => Ok(WizardStep::Basics),
            2 => Ok(WizardStep::Schedule),
            3 => Ok(WizardStep::Payment),
            4 => Ok(WizardStep::Crew),
            5 => Ok(WizardStep::Notify),
            _ => Err(format!("Invalid wizard step index: {index}")),
        }
    }
}
