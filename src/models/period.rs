//! Budget period representation
//!
//! A budget's spending limit resets every period. The period window that
//! contains a given date is what spend is aggregated over.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The recurring interval over which a category spending limit resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Daily,
    Weekly,
    #[default]
    Monthly,
}

/// An inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let start = first_of_month(date.year(), date.month());
        Self {
            start,
            end: last_of_month(date.year(), date.month()),
        }
    }

    /// The ISO week (Monday to Sunday) containing `date`
    pub fn iso_week_of(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        let start = NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)
            .unwrap_or(date - Duration::days(date.weekday().num_days_from_monday() as i64));
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl BudgetPeriod {
    /// The period window that contains `date`
    pub fn window_containing(&self, date: NaiveDate) -> DateWindow {
        match self {
            Self::Daily => DateWindow::new(date, date),
            Self::Weekly => DateWindow::iso_week_of(date),
            Self::Monthly => DateWindow::month_of(date),
        }
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// First day of a month; falls back to January 1st for an invalid month
pub fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1)
        .or_else(|| NaiveDate::from_ymd_opt(year, 1, 1))
        .unwrap_or_default()
}

/// Last day of a month
pub fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month >= 12 {
        first_of_month(year + 1, 1)
    } else {
        first_of_month(year, month + 1)
    };
    next_month - Duration::days(1)
}
