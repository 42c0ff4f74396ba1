//! Ledger CLI commands
//!
//! Transaction validation, category analysis, the monthly summary, budget
//! status and transaction listings.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use chrono::Datelike;
use clap::Args;

use super::Context;
use crate::display::{format_budget_table, format_category_analysis, format_transaction_table};
use crate::error::{LanaError, LanaResult};
use crate::export::export_transactions_csv;
use crate::models::{Money, TransactionKind};
use crate::reports::{monthly_stats, suggested_budget};
use crate::services::{DateStyle, ValidationOutcome};

/// Filters for `lana transactions`
#[derive(Args, Debug, Default)]
pub struct TransactionFilter {
    /// Only this kind (income, expense, transfer)
    #[arg(short, long)]
    pub kind: Option<TransactionKind>,

    /// Only this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Number of transactions to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,

    /// Write all matching transactions to a CSV file instead
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Check a prospective transaction; blocked transactions exit with an error
pub fn handle_validate(
    ctx: &Context,
    category: &str,
    amount: Money,
    kind: TransactionKind,
) -> LanaResult<()> {
    let app = ctx.load_app()?;
    let validation = app.finance.validate_transaction(category, amount, kind);

    match validation.outcome() {
        ValidationOutcome::Blocked(errors) => {
            for error in errors {
                println!("✗ {}", error);
            }
            return Err(LanaError::Validation(errors.join("; ")));
        }
        ValidationOutcome::NeedsConfirmation(warnings) => {
            for warning in warnings {
                println!("⚠ {}", warning);
            }
            println!("La transacción requiere confirmación.");
        }
        ValidationOutcome::Proceed => println!("✓ Transacción válida."),
    }

    Ok(())
}

/// Current month's spending in one category
pub fn handle_analyze(ctx: &Context, category: &str) -> LanaResult<()> {
    let app = ctx.load_app()?;
    let analysis = app.finance.category_spending_analysis(category);

    print!("{}", format_category_analysis(category, &analysis, &app.config));
    if !analysis.transactions.is_empty() {
        println!();
        println!("{}", format_transaction_table(&analysis.transactions, &app.config));
    }
    Ok(())
}

/// Current month's income, expenses and budget totals
pub fn handle_summary(ctx: &Context) -> LanaResult<()> {
    let app = ctx.load_app()?;
    let summary = app.finance.monthly_financial_summary();
    let money = |amount: Money| app.config.format_currency(amount, true);

    println!(
        "Resumen al {}",
        app.config.format_date(app.today(), DateStyle::Long)
    );
    println!("==============================");
    println!("Ingresos:              {}", money(summary.income));
    println!("Gastos:                {}", money(summary.expenses));
    println!("Ingreso neto:          {}", money(summary.net_income));
    println!("Saldo actual:          {}", money(summary.current_balance));
    println!("Presupuesto total:     {}", money(summary.total_budget));
    println!("Presupuesto usado:     {}", money(summary.total_budget_used));
    println!("Presupuesto restante:  {}", money(summary.budget_remaining));
    println!("Tasa de ahorro:        {:.1}%", summary.savings_rate);
    Ok(())
}

/// Budgets with their spend in the current period
pub fn handle_budgets(ctx: &Context) -> LanaResult<()> {
    let app = ctx.load_app()?;
    println!("{}", format_budget_table(&app.finance.budget_statuses(), &app.config));
    println!(
        "Presupuesto sugerido: {}",
        app.config
            .format_currency(suggested_budget(app.finance.transaction_log(), app.today()), true)
    );
    Ok(())
}

/// Newest-first transaction listing, or a CSV export of it
pub fn handle_transactions(ctx: &Context, filter: TransactionFilter) -> LanaResult<()> {
    let app = ctx.load_app()?;

    let transactions: Vec<_> = app
        .finance
        .transactions()
        .into_iter()
        .filter(|t| filter.kind.map_or(true, |kind| t.kind == kind))
        .filter(|t| filter.category.as_deref().map_or(true, |c| t.category == c))
        .collect();

    if let Some(path) = filter.export {
        let file = File::create(&path).map_err(|e| {
            LanaError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        export_transactions_csv(&transactions, BufWriter::new(file))?;
        println!(
            "{} transacciones exportadas a: {}",
            transactions.len(),
            path.display()
        );
        return Ok(());
    }

    let shown: Vec<_> = transactions.into_iter().take(filter.limit).collect();
    println!("{}", format_transaction_table(&shown, &app.config));
    Ok(())
}

/// Totals for a calendar month, `YYYY-MM`; the current month by default
pub fn handle_totals(ctx: &Context, month: Option<String>) -> LanaResult<()> {
    let app = ctx.load_app()?;
    let today = app.today();

    let (year, month) = match month {
        Some(text) => parse_year_month(&text)?,
        None => (today.year(), today.month()),
    };

    let stats = monthly_stats(app.finance.transaction_log(), year, month);
    let money = |amount: Money| app.config.format_currency(amount, true);

    println!("Totales {}-{:02} ({} transacciones)", year, month, stats.transactions.len());
    println!("Ingresos:       {}", money(stats.totals.income));
    println!("Gastos:         {}", money(stats.totals.expenses));
    println!("Transferencias: {}", money(stats.totals.transfers));
    println!("Total:          {}", money(stats.totals.total));

    if !stats.expenses_by_category.is_empty() {
        println!();
        println!("Gastos por categoría:");
        for (category, amount) in &stats.expenses_by_category {
            println!("  {:<18} {}", category, money(*amount));
        }
    }
    Ok(())
}

fn parse_year_month(text: &str) -> LanaResult<(i32, u32)> {
    let invalid = || {
        LanaError::Validation(format!(
            "Invalid month format: {}. Use YYYY-MM (e.g., 2025-01)",
            text
        ))
    };

    let (year, month) = text.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_month() {
        assert_eq!(parse_year_month("2025-01").unwrap(), (2025, 1));
        assert!(parse_year_month("2025-13").unwrap_err().is_validation());
        assert!(parse_year_month("enero").is_err());
    }
}
