//! Persisted draft envelopes and index entries.

use std::collections::BTreeSet;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ProjectDraft, WizardStep};

/// A persisted, resumable snapshot of an in-progress wizard session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    /// Draft identifier, also the storage key suffix
    pub id: String,
    /// The aggregate project record at save time
    pub data: ProjectDraft,
    /// Timestamp of the last save (UTC)
    pub last_modified: Timestamp,
    /// Wizard cursor at save time
    pub current_step: WizardStep,
    /// Steps whose validation had already passed
    pub completed_steps: BTreeSet<WizardStep>,
}

/// Lightweight index entry for enumerating drafts without loading them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftMeta {
    /// Draft identifier
    pub id: String,
    /// Display name derived from the project name
    pub name: String,
    /// Timestamp of the last save (UTC)
    pub last_modified: Timestamp,
    /// Wizard cursor at save time
    pub current_step: WizardStep,
}

/// The savable state of a wizard session, as handed to the draft store.
///
/// Compared by deep value equality so the autosave scheduler can skip
/// writes when nothing changed between ticks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
    /// The aggregate project record
    pub data: ProjectDraft,
    /// Wizard cursor
    pub current_step: WizardStep,
    /// Steps whose validation has passed
    pub completed_steps: BTreeSet<WizardStep>,
}
