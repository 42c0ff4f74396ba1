//! CLI command handlers
//!
//! This module bridges the clap argument parsing in `main.rs` with the
//! services. Every handler receives a `Context` and prints to stdout.

pub mod auth;
pub mod config;
pub mod finance;
pub mod notify;
pub mod report;

pub use auth::{handle_login, handle_logout, handle_register};
pub use config::{handle_config_command, handle_format, ConfigCommands};
pub use finance::{
    handle_analyze, handle_budgets, handle_summary, handle_totals, handle_transactions,
    handle_validate, TransactionFilter,
};
pub use notify::{handle_goals, handle_notify, handle_payments};
pub use report::{handle_health, handle_report, HealthArgs, ReportFormat};

use std::path::PathBuf;
use std::rc::Rc;

use chrono::NaiveDate;

use crate::app::App;
use crate::config::{LanaPaths, Settings};
use crate::error::LanaResult;
use crate::models::Money;
use crate::services::{Clock, FixedClock, SystemClock};
use crate::storage::LedgerStore;

/// What every command needs: where things live and what day it is
pub struct Context {
    pub paths: LanaPaths,
    pub settings: Settings,
    pub ledger: LedgerStore,
    pub clock: Rc<dyn Clock>,
}

impl Context {
    /// `ledger_override` replaces the data directory's ledger file; `today`
    /// freezes the clock at noon of that date
    pub fn new(
        paths: LanaPaths,
        settings: Settings,
        ledger_override: Option<PathBuf>,
        today: Option<NaiveDate>,
    ) -> Self {
        let ledger = LedgerStore::new(ledger_override.unwrap_or_else(|| paths.ledger_file()));
        let clock: Rc<dyn Clock> = match today {
            Some(date) => Rc::new(FixedClock::on(date)),
            None => Rc::new(SystemClock),
        };

        Self {
            paths,
            settings,
            ledger,
            clock,
        }
    }

    /// Load the ledger snapshot and build the services from it
    pub fn load_app(&self) -> LanaResult<App> {
        let ledger = self.ledger.load()?;
        Ok(App::new(Rc::clone(&self.clock), &self.settings, ledger))
    }
}

/// clap value parser for money amounts ("1500", "$1,234.50", "-20")
pub fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}
