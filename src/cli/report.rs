//! CLI commands for reports
//!
//! The period financial report (text, table or CSV) and the financial health
//! score.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::{parse_money, Context};
use crate::display::{format_budget_table, progress_bar};
use crate::error::{LanaError, LanaResult};
use crate::export::export_report_csv;
use crate::models::Money;
use crate::reports::{FinancialReport, InsightKind, ReportPeriod};
use crate::services::HealthInput;

/// How `lana report` renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// The shareable plain-text report
    #[default]
    Text,
    /// Budget table, trend and goal analysis
    Table,
    /// Summary, categories and trend as CSV
    Csv,
}

pub fn handle_report(
    ctx: &Context,
    period: ReportPeriod,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> LanaResult<()> {
    let app = ctx.load_app()?;
    let report = app.report(period);

    match (format, output) {
        (ReportFormat::Csv, Some(path)) => {
            let file = File::create(&path).map_err(|e| {
                LanaError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            export_report_csv(&report, BufWriter::new(file))?;
            println!("Reporte exportado a: {}", path.display());
        }
        (ReportFormat::Csv, None) => export_report_csv(&report, std::io::stdout().lock())?,
        (ReportFormat::Text, Some(path)) => {
            std::fs::write(&path, report.render_text())?;
            println!("Reporte exportado a: {}", path.display());
        }
        (ReportFormat::Text, None) => println!("{}", report.render_text()),
        (ReportFormat::Table, _) => print_report_tables(&report, &app.config),
    }

    Ok(())
}

fn print_report_tables(report: &FinancialReport, config: &crate::services::AppConfigService) {
    let money = |amount: Money| config.format_currency(amount, true);

    println!(
        "Reporte {} ({} a {})",
        report.period, report.start, report.generated_on
    );
    println!(
        "Ingresos {}  Gastos {}  Neto {}  Ahorro {:.1}%",
        money(report.income),
        money(report.expenses),
        money(report.net_income),
        report.savings_rate
    );
    println!(
        "{} transacciones, gasto promedio {}",
        report.total_transactions,
        money(report.average_expense)
    );

    println!();
    println!("{}", format_budget_table(&report.budgets, config));

    println!();
    println!("Tendencia mensual:");
    for trend in &report.monthly_trends {
        println!(
            "  {} {}  +{:<14} -{:<14} = {}",
            trend.label,
            trend.year,
            money(trend.income),
            money(trend.expenses),
            money(trend.net)
        );
    }

    if !report.goals.is_empty() {
        println!();
        println!("Metas:");
        for goal in &report.goals {
            println!(
                "  {:<22} {} {:>5.1}%  {} días  {}",
                goal.name,
                progress_bar(goal.progress, 10),
                goal.progress,
                goal.days_remaining,
                if goal.on_track { "en camino" } else { "retrasada" }
            );
        }
    }

    if !report.insights.is_empty() {
        println!();
        for insight in &report.insights {
            let marker = match insight.kind {
                InsightKind::Warning => "⚠",
                InsightKind::Info => "ℹ",
            };
            println!("{} {}: {}", marker, insight.title, insight.description);
            println!("  {}", insight.action);
        }
    }
}

/// Overrides for the health score inputs; unset values come from the
/// current month
#[derive(Args, Debug, Default)]
pub struct HealthArgs {
    #[arg(long, value_parser = parse_money)]
    pub income: Option<Money>,
    #[arg(long, value_parser = parse_money)]
    pub expenses: Option<Money>,
    #[arg(long, value_parser = parse_money)]
    pub savings: Option<Money>,
    #[arg(long, value_parser = parse_money)]
    pub debt: Option<Money>,
    #[arg(long, value_parser = parse_money)]
    pub emergency_fund: Option<Money>,
}

impl HealthArgs {
    fn apply(&self, base: HealthInput) -> HealthInput {
        HealthInput {
            income: self.income.unwrap_or(base.income),
            expenses: self.expenses.unwrap_or(base.expenses),
            savings: self.savings.unwrap_or(base.savings),
            debt: self.debt.unwrap_or(base.debt),
            emergency_fund: self.emergency_fund.unwrap_or(base.emergency_fund),
        }
    }
}

pub fn handle_health(ctx: &Context, args: &HealthArgs) -> LanaResult<()> {
    let app = ctx.load_app()?;
    let input = args.apply(app.health_input());
    let health = app.config.financial_health_score(&input);

    println!(
        "Salud financiera: {}/100 ({})",
        health.score, health.level
    );
    println!("{}", progress_bar(health.score as f64, 20));
    for recommendation in &health.recommendations {
        println!("• {}", recommendation);
    }
    Ok(())
}
