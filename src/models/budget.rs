//! Budget model
//!
//! A spending limit for one category over a recurring period. How much of it
//! has been spent is derived from the transaction log; the only stored piece
//! of spend is a manual adjustment.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;
use super::period::BudgetPeriod;

/// A category spending limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    #[serde(default)]
    pub id: BudgetId,

    /// Category name, matched against transactions by exact string
    pub category: String,

    /// Spending limit for one period
    pub amount: Money,

    /// Display color (hex)
    #[serde(default = "default_color")]
    pub color: String,

    /// Interval over which the limit resets
    #[serde(default)]
    pub period: BudgetPeriod,

    /// Manual correction on top of the spend derived from transactions
    #[serde(default)]
    pub adjustment: Money,
}

fn default_color() -> String {
    "#737373".to_string()
}

impl Budget {
    /// Create a new monthly budget
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            id: BudgetId::new(),
            category: category.into(),
            amount,
            color: default_color(),
            period: BudgetPeriod::Monthly,
            adjustment: Money::zero(),
        }
    }

    /// Builder-style period setter
    pub fn with_period(mut self, period: BudgetPeriod) -> Self {
        self.period = period;
        self
    }

    /// Builder-style color setter
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Effective spend given the spend derived from transactions
    pub fn spent_from(&self, derived: Money) -> Money {
        (derived + self.adjustment).max_zero()
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.category, self.amount, self.period)
    }
}

/// How close a budget is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetHealth {
    /// At or below 80% of the limit
    Good,
    /// Above 80% of the limit
    Warning,
    /// Above the limit
    Exceeded,
}

impl BudgetHealth {
    pub fn from_usage(spent: Money, limit: Money) -> Self {
        if spent > limit {
            Self::Exceeded
        } else if spent.percent_of(limit) > 80.0 {
            Self::Warning
        } else {
            Self::Good
        }
    }
}

impl fmt::Display for BudgetHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Warning => write!(f, "warning"),
            Self::Exceeded => write!(f, "exceeded"),
        }
    }
}

/// A budget together with its derived spend for the current period
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub budget: Budget,
    pub spent: Money,
    pub remaining: Money,
    pub usage_percent: f64,
    pub health: BudgetHealth,
}

impl BudgetStatus {
    pub fn new(budget: Budget, spent: Money) -> Self {
        let remaining = budget.amount - spent;
        let usage_percent = spent.percent_of(budget.amount);
        let health = BudgetHealth::from_usage(spent, budget.amount);
        Self {
            budget,
            spent,
            remaining,
            usage_percent,
            health,
        }
    }
}
