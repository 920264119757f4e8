//! Worker-related types: head counts and denormalized worker summaries.

use serde::{Deserialize, Serialize};

/// Identifier of a skill in the marketplace catalog.
pub type SkillId = String;

/// Identifier of a worker account.
pub type WorkerId = String;

/// Number of workers a project needs.
///
/// Replaces the legacy "custom" sentinel: a preset choice and a custom
/// head count are both just `Count`, with custom counts simply exceeding
/// the preset range.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkerCount {
    /// Not chosen yet.
    #[default]
    Unspecified,
    /// An exact head count.
    Count(u32),
}

impl WorkerCount {
    /// The numeric count, treating an unspecified count as zero.
    pub fn count(&self) -> u32 {
        match self {
            WorkerCount::Unspecified => 0,
            WorkerCount::Count(n) => *n,
        }
    }
}

/// Denormalized worker summary carried alongside a selection for display.
///
/// Captured at selection time and never re-fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkerSummary {
    /// Worker account identifier
    pub id: WorkerId,
    /// Display name
    pub name: String,
    /// Short self-description shown in selection lists
    pub headline: Option<String>,
    /// Marketplace rating, if the worker has one
    pub rating: Option<f64>,
}
