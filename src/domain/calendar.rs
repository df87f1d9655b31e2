//! Late-month calendar gate.
//!
//! Near the end of the month the engine tightens risk controls: the
//! volatility penalty grows and continuity with the prior buy-list is
//! rewarded. This module only derives the flag; the scorer applies it.

use chrono::{Datelike, NaiveDate};

#[derive(Debug, Clone)]
pub struct CalendarState {
    pub late_mode: bool,
    pub days_remaining: u32,
}

/// Pure function of the wall-clock date and the configured window.
pub fn month_gate(today: NaiveDate, late_window: u32) -> CalendarState {
    let remaining = days_in_month(today.year(), today.month()) - today.day();
    CalendarState {
        late_mode: remaining <= late_window,
        days_remaining: remaining,
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn mid_month_is_not_late() {
        let gate = month_gate(date(2025, 6, 10), 7);
        assert!(!gate.late_mode);
        assert_eq!(gate.days_remaining, 20);
    }

    #[test]
    fn boundary_day_is_late() {
        // June has 30 days; the 23rd leaves exactly 7
        let gate = month_gate(date(2025, 6, 23), 7);
        assert!(gate.late_mode);
        assert_eq!(gate.days_remaining, 7);

        let gate = month_gate(date(2025, 6, 22), 7);
        assert!(!gate.late_mode);
        assert_eq!(gate.days_remaining, 8);
    }

    #[test]
    fn last_day_of_month() {
        let gate = month_gate(date(2025, 1, 31), 7);
        assert!(gate.late_mode);
        assert_eq!(gate.days_remaining, 0);
    }

    #[test]
    fn leap_february() {
        let gate = month_gate(date(2024, 2, 22), 7);
        assert!(gate.late_mode);
        assert_eq!(gate.days_remaining, 7);

        // non-leap year: the 22nd leaves only 6
        let gate = month_gate(date(2025, 2, 22), 7);
        assert!(gate.late_mode);
        assert_eq!(gate.days_remaining, 6);
    }

    #[test]
    fn december_rollover() {
        let gate = month_gate(date(2025, 12, 24), 7);
        assert!(gate.late_mode);
        assert_eq!(gate.days_remaining, 7);
    }
}
