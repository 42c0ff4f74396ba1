//! Financial report
//!
//! Summarises a trailing period (week, month, quarter or year): income and
//! expenses, the largest expense categories, a six-month trend, budget and
//! goal standing, and a handful of automatic insights.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

use super::totals::{calculate_totals, top_categories};
use crate::models::{BudgetHealth, BudgetStatus, DateWindow, Money, SavingsGoal, Transaction};
use crate::services::app_config::month_abbrev;

/// Number of categories listed in the report
pub const TOP_CATEGORY_COUNT: usize = 5;

/// Number of calendar months in the trend
pub const TREND_MONTHS: u32 = 6;

/// Trailing period a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl ReportPeriod {
    /// First day covered when the report is produced on `today`
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        let months = match self {
            Self::Week => return today - Duration::days(7),
            Self::Month => 1,
            Self::Quarter => 3,
            Self::Year => 12,
        };
        today
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for ReportPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "semana" => Ok(Self::Week),
            "month" | "mes" => Ok(Self::Month),
            "quarter" | "trimestre" => Ok(Self::Quarter),
            "year" | "año" => Ok(Self::Year),
            other => Err(format!("Unknown report period: {}", other)),
        }
    }
}

/// Income and expenses of one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    /// Short Spanish month name
    pub label: &'static str,
    pub year: i32,
    pub month: u32,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

/// Standing of one savings goal
#[derive(Debug, Clone, Serialize)]
pub struct GoalAnalysis {
    pub name: String,
    pub progress: f64,
    pub days_remaining: i64,
    /// Saving the monthly target until the deadline reaches the goal
    pub on_track: bool,
}

impl GoalAnalysis {
    pub fn for_goal(goal: &SavingsGoal, today: NaiveDate) -> Self {
        let days_remaining = goal.days_remaining(today);
        let months_left = if days_remaining > 0 {
            (days_remaining + 29) / 30
        } else {
            0
        };
        let projected = goal.current_amount + goal.monthly_target.times(months_left);

        Self {
            name: goal.name.clone(),
            progress: goal.progress_percent(),
            days_remaining,
            on_track: projected >= goal.target_amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Warning,
    Info,
}

/// An automatic observation with a suggested action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub action: String,
}

/// Everything the report screen shows for one period
#[derive(Debug, Clone)]
pub struct FinancialReport {
    pub period: ReportPeriod,
    pub generated_on: NaiveDate,
    pub start: NaiveDate,
    pub income: Money,
    pub expenses: Money,
    pub net_income: Money,
    pub savings_rate: f64,
    pub current_balance: Money,
    pub top_categories: Vec<(String, Money)>,
    pub monthly_trends: Vec<MonthlyTrend>,
    pub budgets: Vec<BudgetStatus>,
    pub goals: Vec<GoalAnalysis>,
    pub insights: Vec<Insight>,
    pub total_transactions: usize,
    pub average_expense: Money,
}

impl FinancialReport {
    /// Build the report for the period ending on `today`
    pub fn generate(
        transactions: &[Transaction],
        budgets: Vec<BudgetStatus>,
        goals: &[SavingsGoal],
        current_balance: Money,
        period: ReportPeriod,
        today: NaiveDate,
    ) -> Self {
        let start = period.start(today);
        let window = DateWindow::new(start, today);
        let in_period: Vec<Transaction> = transactions
            .iter()
            .filter(|t| window.contains(t.date))
            .cloned()
            .collect();

        let totals = calculate_totals(&in_period);
        let savings_rate = totals.total.percent_of(totals.income);
        let expense_count = in_period.iter().filter(|t| t.is_expense()).count().max(1);

        let goals: Vec<GoalAnalysis> = goals
            .iter()
            .map(|g| GoalAnalysis::for_goal(g, today))
            .collect();

        let mut report = Self {
            period,
            generated_on: today,
            start,
            income: totals.income,
            expenses: totals.expenses,
            net_income: totals.total,
            savings_rate,
            current_balance,
            top_categories: top_categories(&in_period, TOP_CATEGORY_COUNT),
            monthly_trends: monthly_trends(transactions, today),
            budgets,
            goals,
            insights: Vec::new(),
            total_transactions: in_period.len(),
            average_expense: totals.expenses.divided_by(expense_count as i64),
        };
        report.insights = report.build_insights();
        report
    }

    fn build_insights(&self) -> Vec<Insight> {
        let mut insights = Vec::new();

        if self.savings_rate < 10.0 {
            insights.push(Insight {
                kind: InsightKind::Warning,
                title: "Baja tasa de ahorro".into(),
                description: format!(
                    "Tu tasa de ahorro es del {:.1}%. Se recomienda ahorrar al menos el 20% de tus ingresos.",
                    self.savings_rate
                ),
                action: "Revisa tus gastos y considera reducir categorías no esenciales.".into(),
            });
        }

        if let Some((category, amount)) = self.top_categories.first() {
            if amount.as_f64() > self.income.as_f64() * 0.4 {
                insights.push(Insight {
                    kind: InsightKind::Info,
                    title: "Categoría dominante".into(),
                    description: format!(
                        "El {:.1}% de tus gastos van a {}.",
                        amount.percent_of(self.expenses),
                        category
                    ),
                    action: "Considera diversificar tus gastos o revisar esta categoría.".into(),
                });
            }
        }

        let exceeded = self
            .budgets
            .iter()
            .filter(|b| b.health == BudgetHealth::Exceeded)
            .count();
        if exceeded > 0 {
            insights.push(Insight {
                kind: InsightKind::Warning,
                title: "Presupuestos excedidos".into(),
                description: format!("Has excedido {} presupuesto(s) este período.", exceeded),
                action: "Ajusta tus presupuestos o reduce gastos en estas categorías.".into(),
            });
        }

        let behind = self
            .goals
            .iter()
            .filter(|g| !g.on_track && g.days_remaining > 0)
            .count();
        if behind > 0 {
            insights.push(Insight {
                kind: InsightKind::Info,
                title: "Metas retrasadas".into(),
                description: format!("Tienes {} meta(s) de ahorro que van retrasadas.", behind),
                action: "Considera aumentar tus ahorros mensuales para estas metas.".into(),
            });
        }

        insights
    }

    /// Shareable plain-text version of the report
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "📊 REPORTE FINANCIERO - {}\n",
            self.period.to_string().to_uppercase()
        ));
        out.push_str(&format!(
            "📅 Período: {}/{}/{}\n\n",
            self.generated_on.day(),
            self.generated_on.month(),
            self.generated_on.year()
        ));

        out.push_str("💰 RESUMEN FINANCIERO:\n");
        out.push_str(&format!("• Ingresos: ${}\n", self.income.to_grouped_string()));
        out.push_str(&format!("• Gastos: ${}\n", self.expenses.to_grouped_string()));
        out.push_str(&format!(
            "• Balance Neto: ${}\n",
            self.net_income.to_grouped_string()
        ));
        out.push_str(&format!("• Tasa de Ahorro: {:.1}%\n", self.savings_rate));
        out.push_str(&format!(
            "• Balance Actual: ${}\n\n",
            self.current_balance.to_grouped_string()
        ));

        out.push_str("📈 TOP CATEGORÍAS DE GASTO:\n");
        for (index, (category, amount)) in self.top_categories.iter().enumerate() {
            out.push_str(&format!(
                "{}. {}: ${}\n",
                index + 1,
                category,
                amount.to_grouped_string()
            ));
        }

        out.push_str("\n💡 INSIGHTS Y RECOMENDACIONES:\n");
        for insight in &self.insights {
            out.push_str(&format!(
                "• {}: {} {}\n",
                insight.title, insight.description, insight.action
            ));
        }

        out.push_str("\n📱 Generado por LanaApp");
        out
    }
}

/// Income and expenses for the six calendar months ending with the current one
pub fn monthly_trends(transactions: &[Transaction], today: NaiveDate) -> Vec<MonthlyTrend> {
    (0..TREND_MONTHS)
        .rev()
        .filter_map(|back| today.checked_sub_months(Months::new(back)))
        .map(|month_date| {
            let window = DateWindow::month_of(month_date);
            let in_month: Vec<Transaction> = transactions
                .iter()
                .filter(|t| window.contains(t.date))
                .cloned()
                .collect();
            let totals = calculate_totals(&in_month);

            MonthlyTrend {
                label: month_abbrev(month_date.month(), false),
                year: month_date.year(),
                month: month_date.month(),
                income: totals.income,
                expenses: totals.expenses,
                net: totals.total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, TransactionKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn units(n: i64) -> Money {
        Money::from_units(n)
    }

    fn transactions() -> Vec<Transaction> {
        vec![
            Transaction::income(units(10000), "Salario", date(2025, 8, 1)),
            Transaction::expense(units(5000), "Hogar", date(2025, 8, 5)),
            Transaction::expense(units(2000), "Comida", date(2025, 8, 10)),
            Transaction::expense(units(1500), "Transporte", date(2025, 8, 12)),
            Transaction::new(TransactionKind::Transfer, units(1000), "Ahorro", date(2025, 8, 15)),
            Transaction::income(units(9000), "Salario", date(2025, 6, 1)),
            Transaction::expense(units(300), "Comida", date(2025, 3, 2)),
        ]
    }

    #[test]
    fn test_period_start() {
        let today = date(2025, 8, 20);
        assert_eq!(ReportPeriod::Week.start(today), date(2025, 8, 13));
        assert_eq!(ReportPeriod::Month.start(today), date(2025, 7, 20));
        assert_eq!(ReportPeriod::Quarter.start(today), date(2025, 5, 20));
        assert_eq!(ReportPeriod::Year.start(today), date(2024, 8, 20));
        assert_eq!("trimestre".parse::<ReportPeriod>(), Ok(ReportPeriod::Quarter));
    }

    #[test]
    fn test_month_report() {
        let today = date(2025, 8, 20);
        let budgets = vec![
            BudgetStatus::new(Budget::new("Comida", units(1500)), units(2000)),
            BudgetStatus::new(Budget::new("Hogar", units(6000)), units(5000)),
        ];
        let report = FinancialReport::generate(
            &transactions(),
            budgets,
            &[],
            units(12000),
            ReportPeriod::Month,
            today,
        );

        assert_eq!(report.income, units(10000));
        assert_eq!(report.expenses, units(8500));
        assert_eq!(report.net_income, units(1500));
        assert!((report.savings_rate - 15.0).abs() < 1e-9);
        assert_eq!(report.total_transactions, 5);
        assert_eq!(report.average_expense, Money::from_cents(283333));
        assert_eq!(report.top_categories[0], ("Hogar".to_string(), units(5000)));

        let titles: Vec<&str> = report.insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Categoría dominante", "Presupuestos excedidos"]);
        assert_eq!(report.insights[0].description, "El 58.8% de tus gastos van a Hogar.");
    }

    #[test]
    fn test_low_savings_insight() {
        let today = date(2025, 8, 20);
        let report = FinancialReport::generate(&[], Vec::new(), &[], Money::zero(), ReportPeriod::Week, today);
        assert_eq!(report.insights.len(), 1);
        assert_eq!(report.insights[0].kind, InsightKind::Warning);
        assert_eq!(report.average_expense, Money::zero());
    }

    #[test]
    fn test_monthly_trends() {
        let trends = monthly_trends(&transactions(), date(2025, 8, 20));
        assert_eq!(trends.len(), 6);
        assert_eq!(trends[0].label, "mar");
        assert_eq!(trends[0].expenses, units(300));
        assert_eq!(trends[3].label, "jun");
        assert_eq!(trends[3].income, units(9000));
        assert_eq!(trends[5].label, "ago");
        assert_eq!(trends[5].net, units(1500));
    }

    #[test]
    fn test_goal_on_track() {
        let today = date(2025, 1, 1);
        let mut goal = SavingsGoal::new("Auto", units(6000), date(2025, 3, 2), today);
        goal.contribute(units(1000));
        assert!(GoalAnalysis::for_goal(&goal, today).on_track);

        // Two months later with nothing more saved
        let later = GoalAnalysis::for_goal(&goal, date(2025, 2, 20));
        assert!(!later.on_track);
        assert_eq!(later.days_remaining, 10);
    }

    #[test]
    fn test_render_text() {
        let today = date(2025, 8, 20);
        let report = FinancialReport::generate(
            &transactions(),
            Vec::new(),
            &[],
            units(12000),
            ReportPeriod::Month,
            today,
        );
        let text = report.render_text();

        assert!(text.starts_with("📊 REPORTE FINANCIERO - MONTH"));
        assert!(text.contains("📅 Período: 20/8/2025"));
        assert!(text.contains("• Ingresos: $10,000"));
        assert!(text.contains("• Tasa de Ahorro: 15.0%"));
        assert!(text.contains("1. Hogar: $5,000"));
        assert!(text.ends_with("📱 Generado por LanaApp"));
    }
}
