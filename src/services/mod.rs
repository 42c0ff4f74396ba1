//! Service layer for Lana
//!
//! Three in-memory services hold the application state: the ledger of
//! transactions and budgets, the notification list and the app settings.
//! Every date they compute against comes from an injected `Clock`.

pub mod app_config;
pub mod clock;
pub mod finance;
pub mod health;
pub mod notification;

pub use app_config::{AppConfigService, DateStyle, FieldValidation, QuickSetting};
pub use clock::{Clock, FixedClock, SystemClock};
pub use finance::{
    CategorySpendingAnalysis, FinanceService, MonthlyFinancialSummary, SpendingOperation,
    TransactionValidation, ValidationOutcome,
};
pub use health::{financial_health_score, HealthInput, HealthLevel, HealthScore};
pub use notification::{
    AchievementInput, NotificationInput, NotificationService, NotificationSettings, Rule,
};
