//! Shared clock helpers.
//!
//! Checkers and the record store take "now" from here so tests can pin the
//! current month explicitly instead of racing the wall clock.

use chrono::{DateTime, Utc};

use crate::core::model::YearMonth;

/// Current wall-clock instant in UTC.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current calendar month in the canonical `YYYY-MM` form.
pub fn current_month() -> YearMonth {
    YearMonth::from(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_month_is_plausible() {
        let now = current_month();
        assert!(now.year() >= 2024);
        assert!((1..=12).contains(&now.month()));
    }

    #[test]
    fn test_current_month_matches_now_utc() {
        let ym = current_month();
        let dt = now_utc();
        assert_eq!(ym, YearMonth::from(dt));
    }
}
