//! Savings goals and recurring payments
//!
//! Both are forward-looking: a goal counts down to its deadline, a payment to
//! its next due date.

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::payment::total_monthly_commitment;
use crate::models::{RecurringPayment, SavingsGoal};
use crate::services::AppConfigService;

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "Meta")]
    name: String,
    #[tabled(rename = "Ahorrado")]
    current: String,
    #[tabled(rename = "Objetivo")]
    target: String,
    #[tabled(rename = "Progreso")]
    progress: String,
    #[tabled(rename = "Mensual")]
    monthly: String,
    #[tabled(rename = "Días")]
    days: String,
}

#[derive(Tabled)]
struct PaymentRow {
    #[tabled(rename = "Pago")]
    name: String,
    #[tabled(rename = "Monto")]
    amount: String,
    #[tabled(rename = "Frecuencia")]
    frequency: String,
    #[tabled(rename = "Próximo")]
    next_payment: String,
    #[tabled(rename = "Estado")]
    status: String,
}

/// Text progress bar of `width` cells
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn format_goal_table(
    goals: &[SavingsGoal],
    today: NaiveDate,
    config: &AppConfigService,
) -> String {
    if goals.is_empty() {
        return "No hay metas de ahorro.".to_string();
    }

    let rows = goals.iter().map(|goal| {
        let progress = goal.progress_percent();
        let days = goal.days_remaining(today);
        GoalRow {
            name: goal.name.clone(),
            current: config.format_currency(goal.current_amount, true),
            target: config.format_currency(goal.target_amount, true),
            progress: format!("{} {:.1}%", progress_bar(progress, 10), progress),
            monthly: config.format_currency(goal.monthly_target, true),
            days: if goal.is_completed() {
                "completada".to_string()
            } else if days < 0 {
                "vencida".to_string()
            } else {
                days.to_string()
            },
        }
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Payments ordered as given, followed by the monthly commitment line
pub fn format_payment_table(
    payments: &[RecurringPayment],
    today: NaiveDate,
    config: &AppConfigService,
) -> String {
    if payments.is_empty() {
        return "No hay pagos recurrentes.".to_string();
    }

    let rows = payments.iter().map(|payment| {
        let days = payment.days_until(today);
        PaymentRow {
            name: payment.name.clone(),
            amount: config.format_currency(payment.amount, true),
            frequency: payment.frequency.to_string(),
            next_payment: payment.next_payment.format("%Y-%m-%d").to_string(),
            status: if !payment.is_active {
                "inactivo".to_string()
            } else if days < 0 {
                "vencido".to_string()
            } else if days == 0 {
                "hoy".to_string()
            } else {
                format!("en {} día(s)", days)
            },
        }
    });

    let mut output = Table::new(rows).with(Style::rounded()).to_string();
    output.push_str(&format!(
        "\nCompromiso mensual: {}",
        config.format_currency(total_monthly_commitment(payments), true)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money};
    use crate::services::FixedClock;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> AppConfigService {
        let mut service = AppConfigService::new(Rc::new(FixedClock::on(date(2025, 1, 20))));
        service.update_settings(|s| {
            s.currency = "USD".into();
            s.locale = "en".into();
        });
        service
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(50.0, 4), "██░░");
        assert_eq!(progress_bar(150.0, 4), "████");
    }

    #[test]
    fn test_goal_table() {
        let today = date(2025, 1, 20);
        let mut goal = SavingsGoal::new("Vacaciones", Money::from_units(10_000), date(2025, 3, 1), today);
        goal.contribute(Money::from_units(2_500));

        let table = format_goal_table(&[goal], today, &config());
        assert!(table.contains("Vacaciones"));
        assert!(table.contains("25.0%"));
        assert!(table.contains("40"));
    }

    #[test]
    fn test_payment_table() {
        let today = date(2025, 1, 20);
        let mut rent = RecurringPayment::new("Renta", Money::from_units(8_000), Frequency::Monthly, today);
        rent.next_payment = today;
        let mut gym = RecurringPayment::new("Gym", Money::from_units(450), Frequency::Monthly, today);
        gym.is_active = false;

        let table = format_payment_table(&[rent, gym], today, &config());
        assert!(table.contains("hoy"));
        assert!(table.contains("inactivo"));
        assert!(table.ends_with("Compromiso mensual: $8,000.00"));
    }
}
