//! Budget display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BudgetHealth, BudgetStatus, Icon};
use crate::services::{AppConfigService, CategorySpendingAnalysis};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Categoría")]
    category: String,
    #[tabled(rename = "Periodo")]
    period: String,
    #[tabled(rename = "Límite")]
    limit: String,
    #[tabled(rename = "Gastado")]
    spent: String,
    #[tabled(rename = "Restante")]
    remaining: String,
    #[tabled(rename = "Uso")]
    usage: String,
}

/// Health marker shown next to the usage percentage
pub fn health_indicator(health: BudgetHealth) -> &'static str {
    match health {
        BudgetHealth::Good => "✓",
        BudgetHealth::Warning => "!",
        BudgetHealth::Exceeded => "✗",
    }
}

/// Table of budgets with their spend for the current period
pub fn format_budget_table(statuses: &[BudgetStatus], config: &AppConfigService) -> String {
    if statuses.is_empty() {
        return "No hay presupuestos.".to_string();
    }

    let rows = statuses.iter().map(|status| BudgetRow {
        category: format!(
            "{} {}",
            Icon::for_category(&status.budget.category),
            status.budget.category
        ),
        period: status.budget.period.to_string(),
        limit: config.format_currency(status.budget.amount, true),
        spent: config.format_currency(status.spent, true),
        remaining: config.format_currency(status.remaining, true),
        usage: format!(
            "{:.0}% {}",
            status.usage_percent,
            health_indicator(status.health)
        ),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Detail view of one category's spending this month
pub fn format_category_analysis(
    category: &str,
    analysis: &CategorySpendingAnalysis,
    config: &AppConfigService,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{} {}\n", Icon::for_category(category), category));
    output.push_str(&format!(
        "Gastado:       {}\n",
        config.format_currency(analysis.spent, true)
    ));
    output.push_str(&format!(
        "Presupuesto:   {}\n",
        config.format_currency(analysis.budget, true)
    ));
    output.push_str(&format!(
        "Restante:      {}\n",
        config.format_currency(analysis.remaining, true)
    ));
    output.push_str(&format!("Uso:           {:.1}%\n", analysis.percentage_used));
    output.push_str(&format!("Transacciones: {}\n", analysis.transactions.len()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Money};
    use crate::services::FixedClock;
    use chrono::NaiveDate;
    use std::rc::Rc;

    fn config() -> AppConfigService {
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        AppConfigService::new(Rc::new(FixedClock::on(today)))
    }

    #[test]
    fn test_budget_table() {
        let statuses = vec![
            BudgetStatus::new(Budget::new("Comida", Money::from_units(2_000)), Money::from_units(2_300)),
            BudgetStatus::new(Budget::new("Transporte", Money::from_units(800)), Money::from_units(600)),
        ];

        let table = format_budget_table(&statuses, &config());
        assert!(table.contains("🍕 Comida"));
        assert!(table.contains("115% ✗"));
        assert!(table.contains("75% ✓"));
        assert!(table.contains("monthly"));
    }

    #[test]
    fn test_empty_budget_table() {
        assert_eq!(format_budget_table(&[], &config()), "No hay presupuestos.");
    }
}
