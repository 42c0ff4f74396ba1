//! Lana - personal finance core
//!
//! This library provides the core of the Lana personal-finance app: a ledger
//! of transactions, budgets, savings goals and recurring payments, the rules
//! that validate and analyze it, a notification engine and the app-wide
//! configuration service.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and settings persistence
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, goals, payments, notifications)
//! - `services`: Finance, notification and configuration services
//! - `reports`: Totals, monthly statistics and the period financial report
//! - `storage`: JSON ledger snapshot storage
//! - `export`: CSV export of transactions and reports
//! - `display`: Terminal tables and lists
//! - `api`: Blocking client for the authentication API
//! - `app`: Wires the services together over one ledger
//! - `cli`: Command handlers for the `lana` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use lana_cli::config::{LanaPaths, Settings};
//! use lana_cli::storage::LedgerStore;
//!
//! let paths = LanaPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let ledger = LedgerStore::new(paths.ledger_file()).load()?;
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LanaError, LanaResult};
