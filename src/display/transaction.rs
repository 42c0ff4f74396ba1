//! Transaction display formatting
//!
//! Register tables and one-line details for transactions.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Icon, Transaction, TransactionKind};
use crate::services::AppConfigService;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Fecha")]
    date: String,
    #[tabled(rename = "Tipo")]
    kind: String,
    #[tabled(rename = "Categoría")]
    category: String,
    #[tabled(rename = "Descripción")]
    description: String,
    #[tabled(rename = "Monto")]
    amount: String,
}

fn signed_amount(txn: &Transaction, config: &AppConfigService) -> String {
    let formatted = config.format_currency(txn.amount, true);
    match txn.kind {
        TransactionKind::Income => format!("+{}", formatted),
        TransactionKind::Expense => format!("-{}", formatted),
        TransactionKind::Transfer => formatted,
    }
}

/// Format transactions as a register table, in the order given
pub fn format_transaction_table(transactions: &[Transaction], config: &AppConfigService) -> String {
    if transactions.is_empty() {
        return "No hay transacciones.".to_string();
    }

    let rows = transactions.iter().map(|txn| TransactionRow {
        date: txn.date.format("%Y-%m-%d").to_string(),
        kind: txn.kind.to_string(),
        category: format!("{} {}", Icon::for_category(&txn.category), txn.category),
        description: truncate(&txn.description, 30),
        amount: signed_amount(txn, config),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format a short transaction summary (one line)
pub fn format_transaction_short(txn: &Transaction, config: &AppConfigService) -> String {
    format!(
        "{} {} {} {}",
        txn.date.format("%Y-%m-%d"),
        txn.id,
        txn.category,
        signed_amount(txn, config)
    )
}

/// Cut a string to `max_chars` characters, marking the cut with `...`
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppSettings;
    use crate::models::Money;
    use crate::services::FixedClock;
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn config() -> AppConfigService {
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let mut service = AppConfigService::new(Rc::new(FixedClock::on(today)));
        service.update_settings(|s: &mut AppSettings| {
            s.currency = "USD".into();
            s.locale = "en".into();
        });
        service
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], &config()), "No hay transacciones.");
    }

    #[test]
    fn test_table_rows() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        let transactions = vec![
            Transaction::expense(Money::from_units(2_300), "Comida", date)
                .with_description("Despensa semanal"),
            Transaction::income(Money::from_units(35_000), "Salario", date),
        ];

        let table = format_transaction_table(&transactions, &config());
        assert!(table.contains("Categoría"));
        assert!(table.contains("🍕 Comida"));
        assert!(table.contains("-$2,300.00"));
        assert!(table.contains("+$35,000.00"));
        assert!(table.contains("Despensa semanal"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Despensa", 20), "Despensa");
        assert_eq!(truncate("Consulta médica general", 10), "Consult...");
    }
}
