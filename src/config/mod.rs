//! Configuration module for Lana
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - Settings and profile persistence

pub mod paths;
pub mod settings;

pub use paths::LanaPaths;
pub use settings::{AppSettings, Settings, UserProfile};
