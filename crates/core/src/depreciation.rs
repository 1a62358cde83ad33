//! Depreciation and replacement-reminder math.
//!
//! Pure functions only. The `db` crate persists the results: the investment
//! row written when an item is created, and the usage/replacement columns
//! written by the replacement sweep.

use crate::error::CoreError;
use crate::types::Date;

/// Default usage threshold (in days) past which an item is flagged for
/// replacement.
pub const DEFAULT_REPLACEMENT_THRESHOLD_DAYS: i32 = 100;

/// Upper bound for `depreciated_rate`, which is a whole-number percentage.
pub const MAX_DEPRECIATION_RATE: i32 = 100;

/// Value of an item after applying its depreciation rate once.
///
/// `current_value = price - price * (rate / 100)`.
pub fn current_value(price: f64, depreciated_rate: i32) -> f64 {
    price - price * (f64::from(depreciated_rate) / 100.0)
}

/// Whole days elapsed between `purchase_date` and `today`.
///
/// Dates in the future yield a negative count, which the replacement rule
/// treats like any other value below the threshold.
pub fn usage_days(purchase_date: Date, today: Date) -> i32 {
    let days = (today - purchase_date).num_days();
    i32::try_from(days).unwrap_or(if days < 0 { i32::MIN } else { i32::MAX })
}

/// Compute the new `is_replacement_needed` flag for an item.
///
/// - below the threshold, a raised flag is cleared;
/// - above the threshold, the flag is raised;
/// - exactly at the threshold, the flag keeps its previous value.
pub fn next_replacement_flag(total_usage_days: i32, threshold_days: i32, current: bool) -> bool {
    if total_usage_days < threshold_days && current {
        false
    } else if total_usage_days > threshold_days {
        true
    } else {
        current
    }
}

/// Usage-derived columns of an item, as recomputed by the replacement sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageState {
    pub total_usage_days: i32,
    pub is_replacement_needed: bool,
}

/// Recompute the usage state of one item as of `today`.
pub fn sweep_item(
    purchase_date: Date,
    is_replacement_needed: bool,
    threshold_days: i32,
    today: Date,
) -> UsageState {
    let total_usage_days = usage_days(purchase_date, today);
    UsageState {
        total_usage_days,
        is_replacement_needed: next_replacement_flag(
            total_usage_days,
            threshold_days,
            is_replacement_needed,
        ),
    }
}

/// Validate a depreciation rate percentage (`0..=100`).
pub fn validate_depreciation_rate(rate: i32) -> Result<(), CoreError> {
    if !(0..=MAX_DEPRECIATION_RATE).contains(&rate) {
        return Err(CoreError::Validation(format!(
            "depreciated_rate must be between 0 and {MAX_DEPRECIATION_RATE}, got {rate}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn current_value_applies_rate_once() {
        assert_eq!(current_value(1000.0, 20), 800.0);
        assert_eq!(current_value(1000.0, 0), 1000.0);
        assert_eq!(current_value(1000.0, 100), 0.0);
    }

    #[test]
    fn usage_days_counts_whole_days() {
        let today = date(2024, 6, 1);
        assert_eq!(usage_days(date(2024, 6, 1), today), 0);
        assert_eq!(usage_days(date(2024, 5, 31), today), 1);
        assert_eq!(usage_days(date(2023, 6, 1), today), 366);
        assert_eq!(usage_days(date(2024, 6, 3), today), -2);
    }

    #[test]
    fn flag_is_raised_above_threshold() {
        assert!(next_replacement_flag(150, 100, false));
        assert!(next_replacement_flag(101, 100, true));
    }

    #[test]
    fn flag_is_cleared_below_threshold() {
        assert!(!next_replacement_flag(50, 100, true));
        assert!(!next_replacement_flag(99, 100, false));
    }

    #[test]
    fn flag_is_unchanged_at_threshold() {
        assert!(next_replacement_flag(100, 100, true));
        assert!(!next_replacement_flag(100, 100, false));
    }

    #[test]
    fn sweep_is_idempotent_without_elapsed_time() {
        let today = date(2024, 6, 1);
        let purchased = today - chrono::Duration::days(150);

        let first = sweep_item(purchased, false, 100, today);
        assert_eq!(first.total_usage_days, 150);
        assert!(first.is_replacement_needed);

        let second = sweep_item(purchased, first.is_replacement_needed, 100, today);
        assert_eq!(first, second);
    }

    #[test]
    fn rate_bounds() {
        assert!(validate_depreciation_rate(0).is_ok());
        assert!(validate_depreciation_rate(100).is_ok());
        assert!(validate_depreciation_rate(-1).is_err());
        assert!(validate_depreciation_rate(101).is_err());
    }
}
