//! Core data models for Lana
//!
//! This module contains the data structures of the personal-finance domain:
//! transactions, budgets, savings goals, recurring payments and notifications.

pub mod budget;
pub mod category;
pub mod goal;
pub mod icon;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod notification;
pub mod payment;
pub mod period;
pub mod transaction;

pub use budget::{Budget, BudgetHealth, BudgetStatus};
pub use category::{predefined_categories, Category};
pub use goal::SavingsGoal;
pub use icon::Icon;
pub use ids::{BudgetId, GoalId, NotificationId, PaymentId, TransactionId};
pub use ledger::Ledger;
pub use money::{Money, MoneyParseError};
pub use notification::{NewNotification, NotificationItem, NotificationKind, Priority};
pub use payment::{Frequency, RecurringPayment};
pub use period::{BudgetPeriod, DateWindow};
pub use transaction::{Importance, Transaction, TransactionKind, TransactionUpdate};
