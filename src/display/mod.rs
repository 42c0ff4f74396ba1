//! Display formatting for terminal output
//!
//! Tables for transactions, budgets, goals and payments, plus the
//! notification list. Amounts go through `AppConfigService::format_currency`
//! so the configured currency and locale apply everywhere.

pub mod budget;
pub mod notification;
pub mod plan;
pub mod transaction;

pub use budget::{format_budget_table, format_category_analysis, health_indicator};
pub use notification::format_notification_list;
pub use plan::{format_goal_table, format_payment_table, progress_bar};
pub use transaction::{format_transaction_short, format_transaction_table, truncate};
