//! Application state
//!
//! `App` owns the three services and the goal and payment lists, all sharing
//! one clock. It is built from the saved settings and a ledger snapshot and
//! is the single place where the services' inputs are assembled.

use std::rc::Rc;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::{Ledger, NotificationId, RecurringPayment, SavingsGoal};
use crate::reports::{calculate_totals, FinancialReport, ReportPeriod};
use crate::services::{
    AppConfigService, Clock, FinanceService, HealthInput, NotificationInput, NotificationService,
};

pub struct App {
    clock: Rc<dyn Clock>,
    pub finance: FinanceService,
    pub notifications: NotificationService,
    pub config: AppConfigService,
    pub goals: Vec<SavingsGoal>,
    pub payments: Vec<RecurringPayment>,
}

impl App {
    pub fn new(clock: Rc<dyn Clock>, settings: &Settings, ledger: Ledger) -> Self {
        let finance = FinanceService::from_ledger(&ledger, Rc::clone(&clock));
        let config = AppConfigService::with_state(
            Rc::clone(&clock),
            settings.app.clone(),
            settings.profile.clone(),
        );
        let mut notifications = NotificationService::new(Rc::clone(&clock));
        notifications.set_settings(config.notification_settings());

        Self {
            clock,
            finance,
            notifications,
            config,
            goals: ledger.goals,
            payments: ledger.payments,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Evaluate every notification rule against the current state
    pub fn check_notifications(&mut self) -> Vec<NotificationId> {
        let budgets = self.finance.budget_statuses();
        let summary = self.finance.monthly_financial_summary();

        self.notifications.check_all_notifications(NotificationInput {
            budgets: &budgets,
            goals: &self.goals,
            payments: &self.payments,
            transactions: self.finance.transaction_log(),
            current_balance: self.finance.balance(),
            monthly_income: summary.income,
            monthly_expenses: summary.expenses,
        })
    }

    /// Financial report for the period ending today
    pub fn report(&self, period: ReportPeriod) -> FinancialReport {
        FinancialReport::generate(
            self.finance.transaction_log(),
            self.finance.budget_statuses(),
            &self.goals,
            self.finance.balance(),
            period,
            self.today(),
        )
    }

    /// Health inputs for the current month: transfers count as savings and
    /// the current balance as the emergency fund
    pub fn health_input(&self) -> HealthInput {
        let summary = self.finance.monthly_financial_summary();
        let today = self.today();
        let this_month = crate::models::DateWindow::month_of(today);
        let month_transactions = self
            .finance
            .transactions_by_date_range(this_month.start, this_month.end);

        HealthInput {
            income: summary.income,
            expenses: summary.expenses,
            savings: calculate_totals(&month_transactions).savings,
            debt: crate::models::Money::zero(),
            emergency_fund: summary.current_balance,
        }
    }

    /// Current state as a ledger snapshot
    pub fn to_ledger(&self) -> Ledger {
        Ledger {
            goals: self.goals.clone(),
            payments: self.payments.clone(),
            ..self.finance.to_ledger()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NotificationKind};
    use crate::services::FixedClock;
    use crate::storage::sample_ledger;

    fn app_on(y: i32, m: u32, d: u32) -> App {
        let today = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        App::new(Rc::new(FixedClock::on(today)), &Settings::default(), sample_ledger())
    }

    #[test]
    fn test_sample_month_summary() {
        let app = app_on(2025, 1, 20);
        let summary = app.finance.monthly_financial_summary();

        assert_eq!(summary.income, Money::from_units(40_000));
        assert_eq!(summary.expenses, Money::from_units(15_250));
        assert_eq!(summary.total_budget, Money::from_units(4_800));
    }

    #[test]
    fn test_health_input_for_sample_month() {
        let input = app_on(2025, 1, 20).health_input();
        assert_eq!(input.savings, Money::from_units(5_000));
        assert_eq!(input.emergency_fund, Money::from_units(15_000));
        assert_eq!(input.debt, Money::zero());
    }

    #[test]
    fn test_check_notifications_on_sample() {
        let mut app = app_on(2025, 1, 20);
        let fired = app.check_notifications();
        assert!(!fired.is_empty());

        let kinds: Vec<NotificationKind> = app.notifications.notifications().iter().map(|n| n.kind).collect();
        // Comida is at 115% of its budget
        assert!(kinds.contains(&NotificationKind::BudgetWarning));
        assert!(kinds.contains(&NotificationKind::Tip));

        // Re-running the same day fires nothing new
        assert!(app.check_notifications().is_empty());
    }

    #[test]
    fn test_ledger_round_trip_keeps_goals() {
        let app = app_on(2025, 1, 20);
        let ledger = app.to_ledger();
        assert_eq!(ledger.goals.len(), 3);
        assert_eq!(ledger.payments.len(), 4);
        assert_eq!(ledger.transactions.len(), 10);
    }
}
