use std::collections::BTreeSet;

use crewline_core::{DraftSnapshot, ProjectDraft, WizardStep};

/// Builds a snapshot with the given project name, as a wizard session
/// would hand to the draft store.
pub fn named_snapshot(name: &str) -> DraftSnapshot {
    DraftSnapshot {
        data: ProjectDraft {
            project_name: name.to_string(),
            ..Default::default()
        },
        current_step: WizardStep::Schedule,
        completed_steps: [WizardStep::Basics].into_iter().collect::<BTreeSet<_>>(),
    }
}
