//! Storage initialization
//!
//! First-run setup: directories plus a ledger snapshot, either empty or
//! seeded with a month of realistic sample data.

use chrono::NaiveDate;
use tracing::info;

use crate::config::paths::LanaPaths;
use crate::error::LanaError;
use crate::models::{
    Budget, Frequency, GoalId, Importance, Ledger, Money, Priority, RecurringPayment,
    SavingsGoal, Transaction, TransactionKind,
};

use super::file_io::write_json_atomic;

/// Create the directories and, when missing, the ledger file
///
/// Returns `true` when a new ledger was written. An existing ledger is never
/// overwritten.
pub fn initialize_storage(paths: &LanaPaths, with_sample_data: bool) -> Result<bool, LanaError> {
    paths.ensure_directories()?;

    let ledger_file = paths.ledger_file();
    if ledger_file.exists() {
        return Ok(false);
    }

    let ledger = if with_sample_data {
        sample_ledger()
    } else {
        Ledger::default()
    };
    write_json_atomic(&ledger_file, &ledger)?;
    info!(
        path = %ledger_file.display(),
        transactions = ledger.transactions.len(),
        "ledger initialized"
    );

    Ok(true)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// January 2025 of a salaried user with four budgets, three goals and four
/// recurring payments
pub fn sample_ledger() -> Ledger {
    let tx = |kind, units, category: &str, day, description: &str, importance| {
        Transaction::new(kind, Money::from_units(units), category, date(2025, 1, day))
            .with_description(description)
            .with_importance(importance)
    };

    use Importance::{High, Low, Medium};
    use TransactionKind::{Expense, Income, Transfer};

    let transactions = vec![
        tx(Income, 35_000, "Salario", 1, "Salario de enero", High),
        tx(Expense, 8_500, "Hogar", 5, "Renta mensual", High),
        tx(Expense, 2_300, "Comida", 7, "Despensa semanal", Medium),
        tx(Expense, 500, "Transporte", 8, "Gasolina", Medium),
        tx(Income, 5_000, "Otros", 10, "Proyecto freelance", Medium),
        tx(Expense, 1_200, "Servicios", 12, "Internet y luz", High),
        tx(Expense, 450, "Entretenimiento", 14, "Netflix y Spotify", Low),
        tx(Transfer, 5_000, "Ahorro", 15, "Ahorro mensual", High),
        tx(Expense, 800, "Salud", 18, "Consulta médica", Medium),
        tx(Expense, 1_500, "Educación", 20, "Curso online", Medium),
    ];

    let budgets = vec![
        Budget::new("Comida", Money::from_units(2_000)).with_color("#f97316"),
        Budget::new("Transporte", Money::from_units(800)).with_color("#3b82f6"),
        Budget::new("Entretenimiento", Money::from_units(500)).with_color("#8b5cf6"),
        Budget::new("Servicios", Money::from_units(1_500)).with_color("#06b6d4"),
    ];

    let goal = |name: &str, target, current, deadline, category: &str, priority, monthly| {
        SavingsGoal {
            id: GoalId::new(),
            name: name.to_string(),
            target_amount: Money::from_units(target),
            current_amount: Money::from_units(current),
            deadline,
            category: category.to_string(),
            priority,
            is_active: true,
            monthly_target: Money::from_units(monthly),
        }
    };

    let goals = vec![
        goal(
            "Fondo de Emergencia",
            50_000,
            15_000,
            date(2025, 12, 31),
            "Emergencias",
            Priority::High,
            8_750,
        ),
        goal(
            "Vacaciones Europa",
            25_000,
            8_500,
            date(2025, 6, 15),
            "Vacaciones",
            Priority::Medium,
            2_750,
        ),
        goal(
            "Auto Nuevo",
            80_000,
            12_000,
            date(2026, 3, 31),
            "Auto",
            Priority::Medium,
            11_333,
        ),
    ];

    let payment = |name: &str, units, category: &str, next_payment, is_active| {
        let mut payment = RecurringPayment::new(
            name,
            Money::from_units(units),
            Frequency::Monthly,
            next_payment,
        );
        payment.category = category.to_string();
        payment.next_payment = next_payment;
        payment.is_active = is_active;
        payment
    };

    let payments = vec![
        payment("Renta", 8_000, "Servicios", date(2025, 2, 1), true),
        payment("Netflix", 250, "Entretenimiento", date(2025, 1, 22), true),
        payment("Seguro Auto", 1_200, "Transporte", date(2025, 1, 25), true),
        payment("Gym", 450, "Salud", date(2025, 1, 10), false),
    ];

    Ledger {
        transactions,
        budgets,
        goals,
        payments,
        ..Ledger::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::calculate_totals;
    use crate::storage::LedgerStore;
    use tempfile::TempDir;

    #[test]
    fn test_sample_ledger_totals() {
        let ledger = sample_ledger();
        let totals = calculate_totals(&ledger.transactions);

        assert_eq!(ledger.transactions.len(), 10);
        assert_eq!(totals.income, Money::from_units(40_000));
        assert_eq!(totals.expenses, Money::from_units(15_250));
        assert_eq!(totals.savings, Money::from_units(5_000));
        assert_eq!(ledger.balance, Money::from_units(15_000));
        assert_eq!(ledger.payments.iter().filter(|p| p.is_active).count(), 3);
    }

    #[test]
    fn test_initialize_writes_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LanaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(initialize_storage(&paths, true).unwrap());
        assert!(!initialize_storage(&paths, false).unwrap());

        let ledger = LedgerStore::new(paths.ledger_file()).load().unwrap();
        assert_eq!(ledger.goals.len(), 3);
    }

    #[test]
    fn test_initialize_empty() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LanaPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths, false).unwrap();
        let ledger = LedgerStore::new(paths.ledger_file()).load().unwrap();
        assert_eq!(ledger, Ledger::default());
    }
}
