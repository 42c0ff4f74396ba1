//! Recurring payment model
//!
//! `next_payment` only moves when the payment is re-saved; nothing advances
//! it as time passes.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::PaymentId;
use super::money::Money;

/// How often a recurring payment repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl Frequency {
    /// The date one period after `from`
    pub fn advance(&self, from: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily => from + Duration::days(1),
            Self::Weekly => from + Duration::days(7),
            Self::Monthly => from.checked_add_months(Months::new(1)).unwrap_or(from),
            Self::Yearly => from.checked_add_months(Months::new(12)).unwrap_or(from),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// A bill or subscription that repeats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPayment {
    #[serde(default)]
    pub id: PaymentId,
    pub name: String,
    pub amount: Money,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub frequency: Frequency,
    pub next_payment: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl RecurringPayment {
    /// Create a payment whose first due date is one period after `today`
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        frequency: Frequency,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            name: name.into(),
            amount,
            category: String::new(),
            frequency,
            next_payment: frequency.advance(today),
            is_active: true,
        }
    }

    /// Re-save the payment: the next due date becomes one period after `today`
    pub fn advance_from(&mut self, today: NaiveDate) {
        self.next_payment = self.frequency.advance(today);
    }

    /// Days from `today` until the next due date (negative when overdue)
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.next_payment - today).num_days()
    }

    /// Approximate cost per month: daily x30, weekly x4, yearly /12
    pub fn monthly_equivalent(&self) -> Money {
        match self.frequency {
            Frequency::Daily => self.amount.times(30),
            Frequency::Weekly => self.amount.times(4),
            Frequency::Monthly => self.amount,
            Frequency::Yearly => self.amount.divided_by(12),
        }
    }
}

impl fmt::Display for RecurringPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} next {}",
            self.name, self.amount, self.frequency, self.next_payment
        )
    }
}

/// Total monthly cost of the active payments
pub fn total_monthly_commitment(payments: &[RecurringPayment]) -> Money {
    payments
        .iter()
        .filter(|p| p.is_active)
        .map(RecurringPayment::monthly_equivalent)
        .sum()
}

/// Active payments ordered by due date, at most `limit`
pub fn upcoming(payments: &[RecurringPayment], limit: usize) -> Vec<&RecurringPayment> {
    let mut active: Vec<&RecurringPayment> = payments.iter().filter(|p| p.is_active).collect();
    active.sort_by_key(|p| p.next_payment);
    active.truncate(limit);
    active
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_advance() {
        let from = date(2025, 1, 31);
        assert_eq!(Frequency::Daily.advance(from), date(2025, 2, 1));
        assert_eq!(Frequency::Weekly.advance(from), date(2025, 2, 7));
        assert_eq!(Frequency::Monthly.advance(from), date(2025, 2, 28));
        assert_eq!(Frequency::Yearly.advance(date(2024, 2, 29)), date(2025, 2, 28));
    }

    #[test]
    fn test_new_sets_next_payment() {
        let payment = RecurringPayment::new(
            "Netflix",
            Money::from_units(250),
            Frequency::Monthly,
            date(2025, 8, 15),
        );
        assert_eq!(payment.next_payment, date(2025, 9, 15));
        assert_eq!(payment.days_until(date(2025, 9, 12)), 3);
    }

    #[test]
    fn test_monthly_equivalent() {
        let today = date(2025, 1, 1);
        let weekly = RecurringPayment::new("Gym", Money::from_units(100), Frequency::Weekly, today);
        let yearly = RecurringPayment::new("Seguro", Money::from_units(1200), Frequency::Yearly, today);
        let mut inactive = RecurringPayment::new("Old", Money::from_units(999), Frequency::Monthly, today);
        inactive.is_active = false;

        assert_eq!(weekly.monthly_equivalent(), Money::from_units(400));
        assert_eq!(yearly.monthly_equivalent(), Money::from_units(100));
        assert_eq!(
            total_monthly_commitment(&[weekly, yearly, inactive]),
            Money::from_units(500)
        );
    }

    #[test]
    fn test_upcoming_order() {
        let today = date(2025, 1, 1);
        let daily = RecurringPayment::new("Cafe", Money::from_units(50), Frequency::Daily, today);
        let monthly = RecurringPayment::new("Renta", Money::from_units(8500), Frequency::Monthly, today);
        let weekly = RecurringPayment::new("Gym", Money::from_units(100), Frequency::Weekly, today);
        let payments = vec![monthly, weekly, daily];

        let next = upcoming(&payments, 2);
        assert_eq!(next.len(), 2);
        assert_eq!(next[0].name, "Cafe");
        assert_eq!(next[1].name, "Gym");
    }
}
