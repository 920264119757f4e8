//! Payment terms for a project.

use serde::{Deserialize, Serialize};

/// How workers are paid: an hourly or daily rate per worker, or a fixed
/// whole-project price.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PaymentTerms {
    /// Per-worker hourly rate.
    Hourly { rate: f64 },
    /// Per-worker daily rate.
    Daily { rate: f64 },
    /// Total project price; not multiplied by the worker count.
    Fixed { total: f64 },
}

impl PaymentTerms {
    /// The configured monetary amount, whatever its unit.
    pub fn amount(&self) -> f64 {
        match self {
            PaymentTerms::Hourly { rate } | PaymentTerms::Daily { rate } => *rate,
            PaymentTerms::Fixed { total } => *total,
        }
    }

    /// Convert to the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentTerms::Hourly { .. } => "hourly",
            PaymentTerms::Daily { .. } => "daily",
            PaymentTerms::Fixed { .. } => "fixed",
        }
    }
}
