//! Reports for Lana
//!
//! Aggregations over the transaction log and the period financial report.

pub mod financial;
pub mod totals;

pub use financial::{FinancialReport, GoalAnalysis, Insight, InsightKind, MonthlyTrend, ReportPeriod};
pub use totals::{calculate_totals, expenses_by_category, monthly_stats, suggested_budget, top_categories, MonthlyStats, Totals};
