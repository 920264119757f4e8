//! Pure cost estimation over a payment configuration.
//!
//! Translates worker count, payment terms, and a schedule into a cost
//! breakdown. Estimation never fails: missing or degenerate input simply
//! contributes zero, so the running total can render at any point during
//! the wizard.

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::models::{PaymentTerms, Schedule, TimeRange, Weekday};

/// Flat platform fee applied to the base labor cost.
pub const SERVICE_FEE_RATE: f64 = 0.05;

/// A derived cost breakdown for display alongside the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Labor cost before fees
    pub base_cost: f64,
    /// Platform fee (5% of the base cost)
    pub service_fee: f64,
    /// Base cost plus fee
    pub total: f64,
    /// Human-readable formula, display only
    pub description: String,
}

impl CostBreakdown {
    fn from_base(base_cost: f64, description: String) -> Self {
        let service_fee = base_cost * SERVICE_FEE_RATE;
        Self {
            base_cost,
            service_fee,
            total: base_cost + service_fee,
            description,
        }
    }

    /// The all-zero breakdown used before any payment data exists.
    pub fn zero() -> Self {
        Self::from_base(0.0, String::new())
    }
}

/// Length of a daily working window in fractional hours, floored at zero
/// for inverted inputs.
pub fn daily_hours(start: Time, end: Time) -> f64 {
    let start_secs =
        i64::from(start.hour()) * 3600 + i64::from(start.minute()) * 60 + i64::from(start.second());
    let end_secs =
        i64::from(end.hour()) * 3600 + i64::from(end.minute()) * 60 + i64::from(end.second());
    let span = end_secs - start_secs;
    if span <= 0 {
        0.0
    } else {
        span as f64 / 3600.0
    }
}

/// Number of billable days for a schedule.
///
/// One-time spans count every calendar day from start through end
/// inclusive, never less than one. Recurring spans walk the same
/// inclusive range and count only days whose weekday is in the working
/// set; both boundary dates are checked.
pub fn billable_days(schedule: &Schedule) -> u32 {
    match schedule {
        Schedule::OneTime { start, end } => span_days(*start, *end).max(1),
        Schedule::Recurring { start, end, days } => {
            if days.is_empty() || end < start {
                return 0;
            }
            let mut count = 0;
            let mut day = *start;
            while day <= *end {
                if days.contains(&Weekday::from_civil(day.weekday())) {
                    count += 1;
                }
                match day.tomorrow() {
                    Ok(next) => day = next,
                    Err(_) => break,
                }
            }
            count
        }
    }
}

fn span_days(start: Date, end: Date) -> u32 {
    let (lo, hi) = if end < start { (end, start) } else { (start, end) };
    let mut count = 0;
    let mut day = lo;
    while day <= hi {
        count += 1;
        match day.tomorrow() {
            Ok(next) => day = next,
            Err(_) => break,
        }
    }
    count
}

/// Derives the cost breakdown for the given payment configuration.
///
/// `workers` of zero, a zero rate, or a zero-length duration all yield a
/// zero-cost breakdown. Fixed payment ignores both the worker count and
/// the schedule: the configured amount is the whole-project price.
pub fn estimate(
    workers: u32,
    payment: Option<&PaymentTerms>,
    schedule: Option<&Schedule>,
    hours: Option<&TimeRange>,
) -> CostBreakdown {
    let Some(payment) = payment else {
        return CostBreakdown::zero();
    };

    match payment {
        PaymentTerms::Hourly { rate } => {
            let hours_per_day = hours.map(|h| h.daily_hours()).unwrap_or(0.0);
            let days = schedule.map(billable_days).unwrap_or(0);
            let base = f64::from(workers) * rate * hours_per_day * f64::from(days);
            let description = format!(
                "{workers} worker(s) x {rate:.2}/hr x {hours_per_day:.1} h/day x {days} day(s)"
            );
            CostBreakdown::from_base(base, description)
        }
        PaymentTerms::Daily { rate } => {
            let days = schedule.map(billable_days).unwrap_or(0);
            let base = f64::from(workers) * rate * f64::from(days);
            let description = format!("{workers} worker(s) x {rate:.2}/day x {days} day(s)");
            CostBreakdown::from_base(base, description)
        }
        PaymentTerms::Fixed { total } => {
            let description = format!("fixed project price {total:.2}");
            CostBreakdown::from_base(*total, description)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use jiff::civil::{date, time};

    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_hourly_example() {
        let schedule = Schedule::one_time(date(2024, 1, 1), date(2024, 1, 3)).unwrap();
        let hours = TimeRange::new(time(9, 0, 0, 0), time(17, 0, 0, 0)).unwrap();
        let payment = PaymentTerms::Hourly { rate: 50.0 };

        let breakdown = estimate(2, Some(&payment), Some(&schedule), Some(&hours));
        assert!(close(breakdown.base_cost, 2400.0));
        assert!(close(breakdown.service_fee, 120.0));
        assert!(close(breakdown.total, 2520.0));
    }

    #[test]
    fn test_daily_recurring_example() {
        let days: BTreeSet<Weekday> =
            [Weekday::Monday, Weekday::Wednesday].into_iter().collect();
        let schedule = Schedule::recurring(date(2024, 1, 1), date(2024, 1, 8), days).unwrap();
        let payment = PaymentTerms::Daily { rate: 300.0 };

        // Jan 1 (Mon), Jan 3 (Wed), Jan 8 (Mon) match.
        assert_eq!(billable_days(&schedule), 3);

        let breakdown = estimate(3, Some(&payment), Some(&schedule), None);
        assert!(close(breakdown.base_cost, 2700.0));
        assert!(close(breakdown.total, 2835.0));
    }

    #[test]
    fn test_fixed_ignores_worker_count() {
        let payment = PaymentTerms::Fixed { total: 5000.0 };
        for workers in [0, 1, 7, 100] {
            let breakdown = estimate(workers, Some(&payment), None, None);
            assert!(close(breakdown.base_cost, 5000.0));
            assert!(close(breakdown.total, 5250.0));
        }
    }

    #[test]
    fn test_zero_workers_or_rate_yields_zero() {
        let schedule = Schedule::one_time(date(2024, 1, 1), date(2024, 1, 5)).unwrap();
        let hours = TimeRange::new(time(8, 0, 0, 0), time(16, 0, 0, 0)).unwrap();

        let hourly = PaymentTerms::Hourly { rate: 50.0 };
        let breakdown = estimate(0, Some(&hourly), Some(&schedule), Some(&hours));
        assert!(close(breakdown.base_cost, 0.0));
        assert!(close(breakdown.total, 0.0));

        let free = PaymentTerms::Daily { rate: 0.0 };
        let breakdown = estimate(5, Some(&free), Some(&schedule), None);
        assert!(close(breakdown.base_cost, 0.0));
        assert!(close(breakdown.total, 0.0));
    }

    #[test]
    fn test_missing_configuration_yields_zero() {
        let breakdown = estimate(3, None, None, None);
        assert!(close(breakdown.total, 0.0));

        // Hourly with no schedule or hours is zero, not an error.
        let hourly = PaymentTerms::Hourly { rate: 80.0 };
        let breakdown = estimate(3, Some(&hourly), None, None);
        assert!(close(breakdown.total, 0.0));
    }

    #[test]
    fn test_service_fee_is_five_percent() {
        let payment = PaymentTerms::Daily { rate: 123.45 };
        let schedule = Schedule::one_time(date(2024, 2, 1), date(2024, 2, 10)).unwrap();
        let breakdown = estimate(4, Some(&payment), Some(&schedule), None);
        assert!(close(breakdown.service_fee, breakdown.base_cost * 0.05));
        assert!(close(
            breakdown.total,
            breakdown.base_cost + breakdown.service_fee
        ));
    }

    #[test]
    fn test_negative_time_span_clamps_to_zero() {
        assert!(close(daily_hours(time(17, 0, 0, 0), time(9, 0, 0, 0)), 0.0));
        assert!(close(daily_hours(time(9, 0, 0, 0), time(9, 0, 0, 0)), 0.0));
        assert!(close(daily_hours(time(9, 0, 0, 0), time(17, 30, 0, 0)), 8.5));
    }

    #[test]
    fn test_one_time_single_day_counts_one() {
        let schedule = Schedule::one_time(date(2024, 6, 1), date(2024, 6, 1)).unwrap();
        assert_eq!(billable_days(&schedule), 1);
    }

    #[test]
    fn test_one_time_inclusive_span() {
        let schedule = Schedule::one_time(date(2024, 1, 1), date(2024, 1, 3)).unwrap();
        assert_eq!(billable_days(&schedule), 3);

        // Month boundary.
        let schedule = Schedule::one_time(date(2024, 1, 30), date(2024, 2, 2)).unwrap();
        assert_eq!(billable_days(&schedule), 4);
    }

    #[test]
    fn test_recurring_boundaries_both_checked() {
        // Start and end both land on working days.
        let days: BTreeSet<Weekday> = [Weekday::Monday].into_iter().collect();
        let schedule = Schedule::recurring(date(2024, 1, 1), date(2024, 1, 15), days).unwrap();
        // Jan 1, Jan 8, Jan 15 are all Mondays.
        assert_eq!(billable_days(&schedule), 3);
    }

    #[test]
    fn test_recurring_empty_working_days_is_zero() {
        let schedule =
            Schedule::recurring(date(2024, 1, 1), date(2024, 1, 31), BTreeSet::new()).unwrap();
        assert_eq!(billable_days(&schedule), 0);
    }
}
