//! Notification service
//!
//! Keeps the notification list and evaluates the alert rules over budgets,
//! goals, payments and transactions. Each rule fires at most once per
//! suppression window for the same subject. The last time a (rule, subject)
//! pair fired is kept in its own index, so removing or clearing
//! notifications does not re-arm a rule.

use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::models::{
    BudgetStatus, DateWindow, Money, NewNotification, NotificationId, NotificationItem,
    NotificationKind, Priority, RecurringPayment, SavingsGoal, Transaction,
};
use crate::services::clock::Clock;

/// Maximum number of notifications kept; older ones are evicted
pub const MAX_NOTIFICATIONS: usize = 50;

/// Daily financial tips, picked by day of year
pub const DAILY_TIPS: [&str; 10] = [
    "Revisa tus gastos hormiga semanalmente para identificar patrones",
    "Automatiza tus ahorros para alcanzar tus metas más fácilmente",
    "Usa la regla 50/30/20: 50% necesidades, 30% gustos, 20% ahorros",
    "Negocia tus servicios recurrentes cada 6 meses",
    "Establece un día sin gastos cada semana",
    "Revisa y ajusta tus presupuestos mensualmente",
    "Considera invertir tus ahorros de emergencia en cuentas de alto rendimiento",
    "Usa listas de compras para evitar gastos impulsivos",
    "Compara precios antes de hacer compras grandes",
    "Celebra tus logros financieros, por pequeños que sean",
];

/// Per-family toggles; a disabled family never fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub budget_warnings: bool,
    pub goal_reminders: bool,
    pub payment_due: bool,
    pub weekly_reports: bool,
    pub achievements: bool,
    pub daily_tips: bool,
    pub expense_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            budget_warnings: true,
            goal_reminders: true,
            payment_due: true,
            weekly_reports: true,
            achievements: true,
            daily_tips: true,
            expense_alerts: true,
        }
    }
}

impl NotificationSettings {
    /// Everything off
    pub fn disabled() -> Self {
        Self {
            budget_warnings: false,
            goal_reminders: false,
            payment_due: false,
            weekly_reports: false,
            achievements: false,
            daily_tips: false,
            expense_alerts: false,
        }
    }
}

/// An alert rule, the unit of duplicate suppression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    BudgetNearLimit,
    BudgetExceeded,
    GoalReminder,
    PaymentDue,
    GoalCompleted,
    SavingsStreak,
    DailyTip,
    HighDailySpend,
    LowBalance,
}

/// How long a fired rule stays quiet for the same subject
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressionWindow {
    /// A rolling period after the last firing
    Rolling(Duration),
    /// Until the calendar day changes
    CalendarDay,
    /// Never fires twice
    Forever,
}

impl SuppressionWindow {
    fn suppresses(&self, last_fired: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::Rolling(window) => now - last_fired < *window,
            Self::CalendarDay => last_fired.date_naive() == now.date_naive(),
            Self::Forever => true,
        }
    }
}

impl Rule {
    pub fn window(&self) -> SuppressionWindow {
        match self {
            Self::BudgetNearLimit
            | Self::BudgetExceeded
            | Self::PaymentDue
            | Self::HighDailySpend
            | Self::LowBalance => SuppressionWindow::Rolling(Duration::hours(24)),
            Self::GoalReminder => SuppressionWindow::Rolling(Duration::days(7)),
            Self::SavingsStreak => SuppressionWindow::Rolling(Duration::days(30)),
            Self::DailyTip => SuppressionWindow::CalendarDay,
            Self::GoalCompleted => SuppressionWindow::Forever,
        }
    }
}

/// Inputs for the achievement rules
#[derive(Debug, Clone, Copy)]
pub struct AchievementInput<'a> {
    pub goals: &'a [SavingsGoal],
    pub monthly_income: Money,
    pub monthly_expenses: Money,
}

/// Everything `check_all_notifications` evaluates
#[derive(Debug, Clone, Copy)]
pub struct NotificationInput<'a> {
    pub budgets: &'a [BudgetStatus],
    pub goals: &'a [SavingsGoal],
    pub payments: &'a [RecurringPayment],
    pub transactions: &'a [Transaction],
    pub current_balance: Money,
    pub monthly_income: Money,
    pub monthly_expenses: Money,
}

/// Notification list plus rule evaluation
pub struct NotificationService {
    clock: Rc<dyn Clock>,
    notifications: Vec<NotificationItem>,
    settings: NotificationSettings,
    last_fired: HashMap<(Rule, Option<Uuid>), DateTime<Utc>>,
}

impl NotificationService {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            notifications: Vec::new(),
            settings: NotificationSettings::default(),
            last_fired: HashMap::new(),
        }
    }

    /// All notifications, newest first
    pub fn notifications(&self) -> &[NotificationItem] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Mark one notification read; returns whether it exists
    pub fn mark_as_read(&mut self, id: NotificationId) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.mark_read();
                true
            }
            None => false,
        }
    }

    pub fn mark_all_as_read(&mut self) {
        self.notifications.iter_mut().for_each(NotificationItem::mark_read);
    }

    /// Delete one notification; returns whether it existed
    pub fn remove_notification(&mut self, id: NotificationId) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    pub fn clear_all_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Prepend a new unread notification, evicting past the cap
    pub fn add_notification(&mut self, notification: NewNotification) -> NotificationId {
        let item = notification.into_item(self.clock.now());
        let id = item.id;
        info!(kind = %item.kind, title = %item.title, "notification added");
        self.notifications.insert(0, item);
        self.notifications.truncate(MAX_NOTIFICATIONS);
        id
    }

    pub fn settings(&self) -> NotificationSettings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: NotificationSettings) {
        self.settings = settings;
    }

    /// Budgets at 90-99% usage, and budgets at or over their limit
    pub fn check_budget_warnings(&mut self, budgets: &[BudgetStatus]) -> Vec<NotificationId> {
        let mut fired = Vec::new();
        if !self.settings.budget_warnings {
            return fired;
        }

        for status in budgets {
            if status.budget.amount.is_zero() {
                continue;
            }
            let subject = Some(*status.budget.id.as_uuid());
            let usage = status.usage_percent;

            let notification = if usage >= 100.0 {
                (
                    Rule::BudgetExceeded,
                    NewNotification::new(
                        NotificationKind::BudgetWarning,
                        "Presupuesto Excedido",
                        format!(
                            "Has excedido tu presupuesto de {} por ${}",
                            status.budget.category,
                            (status.spent - status.budget.amount).to_grouped_string()
                        ),
                        Priority::High,
                    )
                    .with_action("Ajustar Presupuesto"),
                )
            } else if usage >= 90.0 {
                (
                    Rule::BudgetNearLimit,
                    NewNotification::new(
                        NotificationKind::BudgetWarning,
                        "Presupuesto Casi Agotado",
                        format!(
                            "Has usado el {:.0}% de tu presupuesto de {}",
                            usage, status.budget.category
                        ),
                        Priority::Medium,
                    )
                    .with_action("Revisar Gastos"),
                )
            } else {
                continue;
            };

            let (rule, content) = notification;
            fired.extend(self.fire(rule, subject, content));
        }

        fired
    }

    /// Goals close to their deadline, or far from it with little progress
    pub fn check_goal_reminders(&mut self, goals: &[SavingsGoal]) -> Vec<NotificationId> {
        let mut fired = Vec::new();
        if !self.settings.goal_reminders {
            return fired;
        }

        let today = self.clock.today();
        for goal in goals {
            let progress = goal.progress_percent();
            if !goal.is_active || progress >= 100.0 {
                continue;
            }
            let days = goal.days_remaining(today);

            let content = if days > 0 && days <= 30 {
                NewNotification::new(
                    NotificationKind::GoalReminder,
                    "Meta Próxima a Vencer",
                    format!("Solo quedan {} días para tu meta '{}'", days, goal.name),
                    Priority::Medium,
                )
                .with_action("Ahorrar Ahora")
            } else if days > 30 && progress < 50.0 {
                NewNotification::new(
                    NotificationKind::GoalReminder,
                    "Recordatorio de Meta",
                    format!("Llevas {:.0}% de tu meta '{}'", progress, goal.name),
                    Priority::Low,
                )
                .with_action("Ver Progreso")
            } else {
                continue;
            };

            fired.extend(self.fire(Rule::GoalReminder, Some(*goal.id.as_uuid()), content));
        }

        fired
    }

    /// Active payments due within the next three days
    pub fn check_payment_due(&mut self, payments: &[RecurringPayment]) -> Vec<NotificationId> {
        let mut fired = Vec::new();
        if !self.settings.payment_due {
            return fired;
        }

        let today = self.clock.today();
        for payment in payments.iter().filter(|p| p.is_active) {
            let days = payment.days_until(today);
            if !(0..=3).contains(&days) {
                continue;
            }

            let (title, priority) = match days {
                0 => ("Pago Hoy".to_string(), Priority::High),
                1 => ("Pago en 1 día".to_string(), Priority::Medium),
                n => (format!("Pago en {} días", n), Priority::Medium),
            };
            let content = NewNotification::new(
                NotificationKind::PaymentDue,
                title,
                format!("{}: ${}", payment.name, payment.amount.to_grouped_string()),
                priority,
            )
            .with_action("Ver Detalles");

            fired.extend(self.fire(Rule::PaymentDue, Some(*payment.id.as_uuid()), content));
        }

        fired
    }

    /// Completed goals (once per goal, ever) and a savings rate of 20% or more
    pub fn check_achievements(&mut self, input: AchievementInput<'_>) -> Vec<NotificationId> {
        let mut fired = Vec::new();
        if !self.settings.achievements {
            return fired;
        }

        for goal in input.goals.iter().filter(|g| g.is_completed()) {
            let content = NewNotification::new(
                NotificationKind::Achievement,
                "¡Meta Completada!",
                format!(
                    "Has alcanzado tu meta '{}' de ${}",
                    goal.name,
                    goal.target_amount.to_grouped_string()
                ),
                Priority::Low,
            )
            .with_action("Celebrar");
            fired.extend(self.fire(Rule::GoalCompleted, Some(*goal.id.as_uuid()), content));
        }

        let savings_rate = if input.monthly_income.is_positive() {
            (input.monthly_income - input.monthly_expenses).percent_of(input.monthly_income)
        } else {
            0.0
        };
        if savings_rate >= 20.0 {
            let content = NewNotification::new(
                NotificationKind::Achievement,
                "Excelente Ahorro",
                format!("Tienes una tasa de ahorro del {:.1}% este mes", savings_rate),
                Priority::Low,
            )
            .with_action("Ver Estadísticas");
            fired.extend(self.fire(Rule::SavingsStreak, None, content));
        }

        fired
    }

    /// One tip per calendar day
    pub fn generate_daily_tip(&mut self) -> Option<NotificationId> {
        if !self.settings.daily_tips {
            return None;
        }

        let tip = tip_for_day(self.clock.today().ordinal0());
        let content = NewNotification::new(
            NotificationKind::Tip,
            "Consejo Financiero del Día",
            tip,
            Priority::Low,
        );
        self.fire(Rule::DailyTip, None, content)
    }

    /// Compare today's spend and the balance with the trailing 30-day daily average
    pub fn check_expense_alerts(
        &mut self,
        transactions: &[Transaction],
        current_balance: Money,
    ) -> Vec<NotificationId> {
        let mut fired = Vec::new();
        if !self.settings.expense_alerts {
            return fired;
        }

        let today = self.clock.today();
        let trailing = DateWindow::new(today - Duration::days(29), today);
        let expenses = || transactions.iter().filter(|t| t.is_expense());

        let thirty_day_total: Money = expenses()
            .filter(|t| trailing.contains(t.date))
            .map(|t| t.amount)
            .sum();
        if !thirty_day_total.is_positive() {
            return fired;
        }
        let today_total: Money = expenses()
            .filter(|t| t.date == today)
            .map(|t| t.amount)
            .sum();

        // average = thirty_day_total / 30, compared without rounding in i128
        let total = i128::from(thirty_day_total.cents());
        let today_scaled = i128::from(today_total.cents()) * 30;
        let balance_scaled = i128::from(current_balance.cents()) * 30;

        if today_scaled > 2 * total {
            let ratio = today_scaled as f64 / total as f64;
            let content = NewNotification::new(
                NotificationKind::ExpenseAlert,
                "Gastos Elevados Hoy",
                format!(
                    "Has gastado ${} hoy, {:.0}% más que tu promedio",
                    today_total.to_grouped_string(),
                    ratio * 100.0
                ),
                Priority::Medium,
            )
            .with_action("Revisar Gastos");
            fired.extend(self.fire(Rule::HighDailySpend, None, content));
        }

        if balance_scaled < 7 * total {
            let days_covered = balance_scaled.div_euclid(total);
            let content = NewNotification::new(
                NotificationKind::ExpenseAlert,
                "Saldo Bajo",
                format!(
                    "Tu saldo actual solo cubre {} días de gastos promedio",
                    days_covered
                ),
                Priority::High,
            )
            .with_action("Revisar Presupuesto");
            fired.extend(self.fire(Rule::LowBalance, None, content));
        }

        fired
    }

    /// Run every rule family in order
    pub fn check_all_notifications(&mut self, input: NotificationInput<'_>) -> Vec<NotificationId> {
        let mut fired = self.check_budget_warnings(input.budgets);
        fired.extend(self.check_goal_reminders(input.goals));
        fired.extend(self.check_payment_due(input.payments));
        fired.extend(self.check_achievements(AchievementInput {
            goals: input.goals,
            monthly_income: input.monthly_income,
            monthly_expenses: input.monthly_expenses,
        }));
        fired.extend(self.generate_daily_tip());
        fired.extend(self.check_expense_alerts(input.transactions, input.current_balance));
        fired
    }

    /// When a rule last fired for a subject
    pub fn last_fired(&self, rule: Rule, subject: Option<Uuid>) -> Option<DateTime<Utc>> {
        self.last_fired.get(&(rule, subject)).copied()
    }

    fn fire(
        &mut self,
        rule: Rule,
        subject: Option<Uuid>,
        content: NewNotification,
    ) -> Option<NotificationId> {
        let now = self.clock.now();
        if let Some(last) = self.last_fired(rule, subject) {
            if rule.window().suppresses(last, now) {
                return None;
            }
        }

        self.last_fired.insert((rule, subject), now);
        let content = match subject {
            Some(id) => content.with_subject(id),
            None => content,
        };
        Some(self.add_notification(content))
    }
}

/// The tip shown on a given zero-based day of the year
pub fn tip_for_day(ordinal0: u32) -> &'static str {
    DAILY_TIPS[ordinal0 as usize % DAILY_TIPS.len()]
}
