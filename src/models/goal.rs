//! Savings goal model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;
use super::notification::Priority;

/// A savings target with a deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    #[serde(default)]
    pub id: GoalId,
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub current_amount: Money,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Monthly contribution needed, fixed when the goal is created or edited
    #[serde(default)]
    pub monthly_target: Money,
}

fn default_active() -> bool {
    true
}

impl SavingsGoal {
    /// Create a new goal; the monthly target is computed against `today`
    pub fn new(
        name: impl Into<String>,
        target_amount: Money,
        deadline: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            target_amount,
            current_amount: Money::zero(),
            deadline,
            category: String::new(),
            priority: Priority::Medium,
            is_active: true,
            monthly_target: monthly_target_for(target_amount, deadline, today),
        }
    }

    /// Change target and deadline, recomputing the monthly target
    pub fn reschedule(&mut self, target_amount: Money, deadline: NaiveDate, today: NaiveDate) {
        self.target_amount = target_amount;
        self.deadline = deadline;
        self.monthly_target = monthly_target_for(target_amount, deadline, today);
    }

    /// Add money saved toward this goal
    pub fn contribute(&mut self, amount: Money) {
        self.current_amount += amount;
    }

    /// Progress toward the target in percent (may exceed 100)
    pub fn progress_percent(&self) -> f64 {
        self.current_amount.percent_of(self.target_amount)
    }

    /// Amount still missing, never negative
    pub fn remaining(&self) -> Money {
        (self.target_amount - self.current_amount).max_zero()
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Whole days from `today` until the deadline (negative once past)
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }
}

impl fmt::Display for SavingsGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} by {}",
            self.name, self.current_amount, self.target_amount, self.deadline
        )
    }
}

/// `target / max(ceil(days / 30), 1)`
pub fn monthly_target_for(target: Money, deadline: NaiveDate, today: NaiveDate) -> Money {
    let days = (deadline - today).num_days();
    let months = if days <= 0 { 1 } else { (days + 29) / 30 };
    target.divided_by(months.max(1))
}
