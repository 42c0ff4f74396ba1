//! A point-in-time snapshot of a user's finances
//!
//! The services keep their state in memory; a `Ledger` is how that state is
//! handed to them in one piece (from a JSON file, a test, or a front-end).

use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::goal::SavingsGoal;
use super::money::Money;
use super::payment::RecurringPayment;
use super::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default = "default_balance")]
    pub balance: Money,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub payments: Vec<RecurringPayment>,
}

/// Opening balance for a fresh ledger
pub fn default_balance() -> Money {
    Money::from_units(15_000)
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            balance: default_balance(),
            transactions: Vec::new(),
            budgets: Vec::new(),
            goals: Vec::new(),
            payments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let ledger: Ledger = serde_json::from_str("{}").unwrap();
        assert_eq!(ledger, Ledger::default());
        assert_eq!(ledger.balance, Money::from_units(15_000));
    }
}
