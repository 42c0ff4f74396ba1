//! CSV export
//!
//! Transactions and report categories as spreadsheet-friendly CSV. Amounts
//! are written as decimal units with two places.

use std::io::Write;

use serde::Serialize;

use crate::error::LanaResult;
use crate::models::{Money, Transaction};
use crate::reports::FinancialReport;

#[derive(Serialize)]
struct TransactionRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Importance")]
    importance: String,
}

fn decimal(amount: Money) -> String {
    format!("{:.2}", amount.as_f64())
}

/// Write every transaction as one row, in the order given
pub fn export_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> LanaResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for txn in transactions {
        csv_writer.serialize(TransactionRow {
            id: txn.id.as_uuid().to_string(),
            date: txn.date.format("%Y-%m-%d").to_string(),
            kind: txn.kind.to_string(),
            category: &txn.category,
            description: &txn.description,
            amount: decimal(txn.amount),
            importance: txn.importance.to_string(),
        })?;
    }

    if transactions.is_empty() {
        csv_writer.write_record([
            "ID",
            "Date",
            "Type",
            "Category",
            "Description",
            "Amount",
            "Importance",
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Summary figures and the top expense categories of a report
pub fn export_report_csv<W: Write>(report: &FinancialReport, writer: W) -> LanaResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["Section", "Name", "Amount"])?;
    for (name, amount) in [
        ("Ingresos", report.income),
        ("Gastos", report.expenses),
        ("Balance Neto", report.net_income),
        ("Balance Actual", report.current_balance),
    ] {
        csv_writer.write_record(["Resumen", name, decimal(amount).as_str()])?;
    }
    csv_writer.write_record([
        "Resumen",
        "Tasa de Ahorro",
        format!("{:.1}", report.savings_rate).as_str(),
    ])?;

    for (category, amount) in &report.top_categories {
        csv_writer.write_record(["Categoría", category.as_str(), decimal(*amount).as_str()])?;
    }
    for trend in &report.monthly_trends {
        let label = format!("{} {}", trend.label, trend.year);
        csv_writer.write_record(["Tendencia", label.as_str(), decimal(trend.net).as_str()])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ReportPeriod;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_transactions_csv() {
        let transactions = vec![
            Transaction::expense(Money::from_cents(230_050), "Comida", date(2025, 1, 7))
                .with_description("Despensa, semanal"),
            Transaction::income(Money::from_units(35_000), "Salario", date(2025, 1, 1)),
        ];

        let mut out = Vec::new();
        export_transactions_csv(&transactions, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID,Date,Type,Category,Description,Amount,Importance");
        assert!(lines[1].ends_with(",2025-01-07,expense,Comida,\"Despensa, semanal\",2300.50,medium"));
        assert!(lines[2].contains(",income,Salario,,35000.00,"));
    }

    #[test]
    fn test_empty_transactions_csv_has_header() {
        let mut out = Vec::new();
        export_transactions_csv(&[], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ID,Date,Type,Category,Description,Amount,Importance\n"
        );
    }

    #[test]
    fn test_report_csv() {
        let transactions = vec![
            Transaction::income(Money::from_units(10_000), "Salario", date(2025, 8, 1)),
            Transaction::expense(Money::from_units(2_500), "Hogar", date(2025, 8, 3)),
        ];
        let report = FinancialReport::generate(
            &transactions,
            Vec::new(),
            &[],
            Money::from_units(7_500),
            ReportPeriod::Month,
            date(2025, 8, 20),
        );

        let mut out = Vec::new();
        export_report_csv(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Section,Name,Amount\n"));
        assert!(text.contains("Resumen,Ingresos,10000.00\n"));
        assert!(text.contains("Resumen,Tasa de Ahorro,75.0\n"));
        assert!(text.contains("Categoría,Hogar,2500.00\n"));
        assert!(text.contains("Tendencia,ago 2025,7500.00\n"));
    }
}
