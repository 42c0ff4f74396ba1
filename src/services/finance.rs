//! Finance service
//!
//! Holds the transaction log, the category budgets and the current balance,
//! and answers the questions the front-end asks before and after a user
//! records money moving: is this expense allowed, how much of a budget is
//! used, what did this month look like.
//!
//! Budget spend is always derived from the transaction log, filtered by
//! category and the budget's current period window. The only stored part of
//! spend is `Budget::adjustment`, which `update_budget_spending` maintains.

use std::rc::Rc;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    Budget, BudgetStatus, DateWindow, Ledger, Money, Transaction, TransactionId,
    TransactionKind, TransactionUpdate,
};
use crate::services::clock::Clock;

/// Remaining balance under which an expense triggers a low-balance warning
pub const LOW_BALANCE_THRESHOLD: Money = Money::from_units(1_000);

/// Budget usage above which an expense triggers a usage warning
pub const BUDGET_USAGE_WARNING_PERCENT: f64 = 80.0;

/// Direction of a manual budget spend correction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendingOperation {
    Add,
    Subtract,
}

/// Result of checking a prospective transaction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionValidation {
    pub is_valid: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

/// What the caller should do with a validated transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome<'a> {
    /// Errors present; the transaction must not be recorded
    Blocked(&'a [String]),
    /// Only warnings; ask the user to confirm
    NeedsConfirmation(&'a [String]),
    /// Nothing to report
    Proceed,
}

impl TransactionValidation {
    pub fn outcome(&self) -> ValidationOutcome<'_> {
        if !self.is_valid {
            ValidationOutcome::Blocked(&self.errors)
        } else if !self.warnings.is_empty() {
            ValidationOutcome::NeedsConfirmation(&self.warnings)
        } else {
            ValidationOutcome::Proceed
        }
    }
}

/// Current-month spend of one category, derived from transactions
#[derive(Debug, Clone)]
pub struct CategorySpendingAnalysis {
    pub spent: Money,
    /// The category's budget limit, zero when it has no budget
    pub budget: Money,
    pub remaining: Money,
    pub percentage_used: f64,
    pub transactions: Vec<Transaction>,
}

/// Current-month income, expenses and budget totals
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyFinancialSummary {
    pub income: Money,
    pub expenses: Money,
    pub net_income: Money,
    pub current_balance: Money,
    pub total_budget: Money,
    pub total_budget_used: Money,
    pub budget_remaining: Money,
    pub savings_rate: f64,
}

/// Service holding transactions, budgets and balance
pub struct FinanceService {
    clock: Rc<dyn Clock>,
    transactions: Vec<Transaction>,
    budgets: Vec<Budget>,
    balance: Money,
}

impl FinanceService {
    /// Create an empty service with the default opening balance
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            transactions: Vec::new(),
            budgets: Vec::new(),
            balance: crate::models::ledger::default_balance(),
        }
    }

    /// Create a service loaded with a ledger snapshot
    pub fn from_ledger(ledger: &Ledger, clock: Rc<dyn Clock>) -> Self {
        let mut service = Self::new(clock);
        service.set_transactions(ledger.transactions.clone());
        service.set_budgets(ledger.budgets.clone());
        service.set_balance(ledger.balance);
        service
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub fn set_budgets(&mut self, budgets: Vec<Budget>) {
        self.budgets = budgets;
    }

    pub fn set_balance(&mut self, balance: Money) {
        self.balance = balance;
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// All transactions, newest first
    pub fn transactions(&self) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Transactions in insertion order
    pub fn transaction_log(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Record a new transaction
    pub fn add_transaction(&mut self, transaction: Transaction) -> Transaction {
        debug!(id = %transaction.id, kind = %transaction.kind, "adding transaction");
        self.transactions.push(transaction.clone());
        transaction
    }

    /// Edit a transaction in place; `None` if the ID is unknown
    pub fn update_transaction(
        &mut self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> Option<Transaction> {
        let transaction = self.transactions.iter_mut().find(|t| t.id == id)?;
        transaction.apply(update);
        Some(transaction.clone())
    }

    /// Remove a transaction; returns whether one was removed
    pub fn delete_transaction(&mut self, id: TransactionId) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        self.transactions.len() != before
    }

    pub fn transactions_by_kind(&self, kind: TransactionKind) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .cloned()
            .collect()
    }

    pub fn transactions_by_category(&self, category: &str) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.category == category)
            .cloned()
            .collect()
    }

    /// Transactions dated within `start..=end`
    pub fn transactions_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        let window = DateWindow::new(start, end);
        self.transactions
            .iter()
            .filter(|t| window.contains(t.date))
            .cloned()
            .collect()
    }

    /// The first budget for a category
    pub fn budget_for(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }

    /// Spend of a budget's category in its current period, from transactions only
    pub fn derived_spend(&self, budget: &Budget) -> Money {
        let window = budget.period.window_containing(self.clock.today());
        self.transactions
            .iter()
            .filter(|t| t.is_expense() && t.category == budget.category && window.contains(t.date))
            .map(|t| t.amount)
            .sum()
    }

    /// Effective spend of a budget: derived spend plus its manual adjustment
    pub fn budget_spent(&self, budget: &Budget) -> Money {
        budget.spent_from(self.derived_spend(budget))
    }

    /// The first budget for a category with its current spend
    pub fn budget_status(&self, category: &str) -> Option<BudgetStatus> {
        self.budget_for(category)
            .map(|b| BudgetStatus::new(b.clone(), self.budget_spent(b)))
    }

    /// Every budget with its current spend
    pub fn budget_statuses(&self) -> Vec<BudgetStatus> {
        self.budgets
            .iter()
            .map(|b| BudgetStatus::new(b.clone(), self.budget_spent(b)))
            .collect()
    }

    /// Check a prospective transaction against balance and budget
    ///
    /// Only expenses are checked. An expense larger than the balance is an
    /// error; exceeding or nearly exhausting the category budget, or leaving
    /// a small positive balance, are warnings.
    pub fn validate_transaction(
        &self,
        category: &str,
        amount: Money,
        kind: TransactionKind,
    ) -> TransactionValidation {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if kind == TransactionKind::Expense {
            if amount > self.balance {
                errors.push(format!(
                    "Saldo insuficiente. Saldo actual: ${}",
                    self.balance.to_grouped_string()
                ));
            }

            if let Some(budget) = self.budget_for(category) {
                let new_spent = self.budget_spent(budget) + amount;
                let percentage_used = new_spent.percent_of(budget.amount);

                if new_spent > budget.amount {
                    warnings.push(format!(
                        "Excederás el presupuesto de {} por ${}",
                        category,
                        (new_spent - budget.amount).to_grouped_string()
                    ));
                } else if percentage_used > BUDGET_USAGE_WARNING_PERCENT {
                    warnings.push(format!(
                        "Usarás el {:.0}% de tu presupuesto de {}",
                        percentage_used, category
                    ));
                }
            }

            let remaining = self.balance - amount;
            if remaining < LOW_BALANCE_THRESHOLD && remaining.is_positive() {
                warnings.push(format!(
                    "Tu saldo quedará bajo: ${}",
                    remaining.to_grouped_string()
                ));
            }
        }

        TransactionValidation {
            is_valid: errors.is_empty(),
            warnings,
            errors,
        }
    }

    /// Manually correct the spend of the budgets for `category`
    ///
    /// Subtracting never takes spend below zero. Unknown categories are ignored.
    pub fn update_budget_spending(
        &mut self,
        category: &str,
        amount: Money,
        operation: SpendingOperation,
    ) {
        let today = self.clock.today();
        let mut matched = false;

        for budget in self.budgets.iter_mut().filter(|b| b.category == category) {
            matched = true;
            let window = budget.period.window_containing(today);
            let derived: Money = self
                .transactions
                .iter()
                .filter(|t| t.is_expense() && t.category == category && window.contains(t.date))
                .map(|t| t.amount)
                .sum();
            let spent = budget.spent_from(derived);

            match operation {
                SpendingOperation::Add => budget.adjustment += amount,
                SpendingOperation::Subtract => {
                    let reduction = amount.max_zero().min(spent);
                    // Re-anchor so the new spend is exactly `spent - reduction`
                    budget.adjustment = spent - reduction - derived;
                }
            }
        }

        if !matched {
            debug!(category, "no budget for category, spending update ignored");
        }
    }

    /// Apply a recorded transaction to the balance
    ///
    /// Income adds; expenses and transfers into savings subtract.
    pub fn update_balance(&mut self, amount: Money, kind: TransactionKind) {
        match kind {
            TransactionKind::Income => self.balance += amount,
            TransactionKind::Expense | TransactionKind::Transfer => self.balance -= amount,
        }
    }

    /// Current-month expense total for a category, independent of budget adjustments
    pub fn category_spending_analysis(&self, category: &str) -> CategorySpendingAnalysis {
        let month = DateWindow::month_of(self.clock.today());
        let transactions: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.is_expense() && t.category == category && month.contains(t.date))
            .cloned()
            .collect();

        let spent: Money = transactions.iter().map(|t| t.amount).sum();
        let budget = self
            .budget_for(category)
            .map(|b| b.amount)
            .unwrap_or_default();

        CategorySpendingAnalysis {
            spent,
            budget,
            remaining: budget - spent,
            percentage_used: spent.percent_of(budget),
            transactions,
        }
    }

    /// Current-month income and expenses plus budget totals
    pub fn monthly_financial_summary(&self) -> MonthlyFinancialSummary {
        let month = DateWindow::month_of(self.clock.today());
        let in_month: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|t| month.contains(t.date))
            .collect();

        let income: Money = in_month.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let expenses: Money = in_month.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

        let total_budget: Money = self.budgets.iter().map(|b| b.amount).sum();
        let total_budget_used: Money = self.budgets.iter().map(|b| self.budget_spent(b)).sum();

        let net_income = income - expenses;
        MonthlyFinancialSummary {
            income,
            expenses,
            net_income,
            current_balance: self.balance,
            total_budget,
            total_budget_used,
            budget_remaining: total_budget - total_budget_used,
            savings_rate: net_income.percent_of(income),
        }
    }

    /// Snapshot of the current state
    pub fn to_ledger(&self) -> Ledger {
        Ledger {
            balance: self.balance,
            transactions: self.transactions.clone(),
            budgets: self.budgets.clone(),
            ..Ledger::default()
        }
    }
}
