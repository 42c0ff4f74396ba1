//! Transaction totals
//!
//! Plain aggregations over a slice of transactions: totals per kind, expenses
//! per category, a month's statistics and a suggested monthly budget.

use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::models::period::{first_of_month, last_of_month};
use crate::models::{DateWindow, Money, Transaction, TransactionKind};

/// Sums per transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expenses: Money,
    pub transfers: Money,
    /// `income - expenses`
    pub total: Money,
    /// Money moved into savings (the transfers)
    pub savings: Money,
}

/// Totals for every kind of transaction in the slice
pub fn calculate_totals(transactions: &[Transaction]) -> Totals {
    let sum_of = |kind: TransactionKind| -> Money {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    };

    let income = sum_of(TransactionKind::Income);
    let expenses = sum_of(TransactionKind::Expense);
    let transfers = sum_of(TransactionKind::Transfer);

    Totals {
        income,
        expenses,
        transfers,
        total: income - expenses,
        savings: transfers,
    }
}

/// Expense totals keyed by category name
pub fn expenses_by_category(transactions: &[Transaction]) -> BTreeMap<String, Money> {
    let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        *by_category.entry(txn.category.clone()).or_default() += txn.amount;
    }
    by_category
}

/// The `limit` largest expense categories, largest first
pub fn top_categories(transactions: &[Transaction], limit: usize) -> Vec<(String, Money)> {
    let mut ranked: Vec<(String, Money)> = expenses_by_category(transactions).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// One calendar month of activity
#[derive(Debug, Clone)]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub totals: Totals,
    pub transactions: Vec<Transaction>,
    pub expenses_by_category: BTreeMap<String, Money>,
}

/// Statistics for a calendar month (`month` is 1-12)
pub fn monthly_stats(transactions: &[Transaction], year: i32, month: u32) -> MonthlyStats {
    let window = DateWindow::new(first_of_month(year, month), last_of_month(year, month));
    let in_month: Vec<Transaction> = transactions
        .iter()
        .filter(|t| window.contains(t.date))
        .cloned()
        .collect();

    MonthlyStats {
        year,
        month,
        totals: calculate_totals(&in_month),
        expenses_by_category: expenses_by_category(&in_month),
        transactions: in_month,
    }
}

/// 90% of the average monthly expense over the last three months, in whole units
pub fn suggested_budget(transactions: &[Transaction], today: NaiveDate) -> Money {
    let since = today
        .checked_sub_months(Months::new(3))
        .unwrap_or(NaiveDate::MIN);
    let recent: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.date >= since)
        .cloned()
        .collect();

    let average = calculate_totals(&recent).expenses.as_f64() / 3.0;
    Money::from_units((average * 0.9).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::income(units(35000), "Salario", date(2025, 1, 1)),
            Transaction::expense(units(8500), "Hogar", date(2025, 1, 5)),
            Transaction::expense(units(2300), "Comida", date(2025, 1, 7)),
            Transaction::expense(units(500), "Transporte", date(2025, 1, 8)),
            Transaction::new(TransactionKind::Transfer, units(5000), "Ahorro", date(2025, 1, 15)),
            Transaction::expense(units(700), "Comida", date(2025, 2, 3)),
        ]
    }

    #[test]
    fn test_totals_identity() {
        let transactions = sample();
        let totals = calculate_totals(&transactions);

        let income: Money = transactions.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let expenses: Money = transactions.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();
        assert_eq!(totals.total, income - expenses);
        assert_eq!(totals.income, units(35000));
        assert_eq!(totals.expenses, units(12000));
        assert_eq!(totals.transfers, units(5000));
        assert_eq!(totals.savings, totals.transfers);
    }

    #[test]
    fn test_totals_identity_over_prefixes() {
        let transactions = sample();
        for end in 0..=transactions.len() {
            let slice = &transactions[..end];
            let totals = calculate_totals(slice);
            assert_eq!(totals.total, totals.income - totals.expenses);
        }
        assert_eq!(calculate_totals(&[]), Totals::default());
    }

    #[test]
    fn test_expenses_by_category() {
        let by_category = expenses_by_category(&sample());
        assert_eq!(by_category.len(), 3);
        assert_eq!(by_category["Comida"], units(3000));
        assert!(!by_category.contains_key("Salario"));
        assert!(!by_category.contains_key("Ahorro"));
    }

    #[test]
    fn test_top_categories() {
        let top = top_categories(&sample(), 2);
        assert_eq!(top, vec![("Hogar".to_string(), units(8500)), ("Comida".to_string(), units(3000))]);
    }

    #[test]
    fn test_monthly_stats() {
        let stats = monthly_stats(&sample(), 2025, 1);
        assert_eq!(stats.transactions.len(), 5);
        assert_eq!(stats.totals.expenses, units(11300));
        assert_eq!(stats.expenses_by_category["Comida"], units(2300));

        let february = monthly_stats(&sample(), 2025, 2);
        assert_eq!(february.totals.expenses, units(700));
        assert_eq!(february.totals.income, Money::zero());
    }

    #[test]
    fn test_suggested_budget() {
        let transactions = vec![
            Transaction::expense(units(3000), "Comida", date(2025, 3, 10)),
            Transaction::expense(units(3000), "Comida", date(2025, 4, 10)),
            Transaction::expense(units(3000), "Comida", date(2025, 5, 10)),
            Transaction::expense(units(9999), "Comida", date(2025, 1, 10)),
        ];
        // 9000 / 3 * 0.9
        assert_eq!(suggested_budget(&transactions, date(2025, 5, 20)), units(2700));
        assert_eq!(suggested_budget(&[], date(2025, 5, 20)), Money::zero());
    }
}
