//! Export module for Lana
//!
//! - CSV: transactions and report summaries (spreadsheet-compatible)
//! - Text: the shareable financial report, see `FinancialReport::render_text`

pub mod csv;

pub use self::csv::{export_report_csv, export_transactions_csv};
