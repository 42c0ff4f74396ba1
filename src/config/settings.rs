//! User settings for Lana
//!
//! `AppSettings` and `UserProfile` are the shapes the config service works
//! on; `Settings` is what gets written to `config.json`.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::paths::LanaPaths;
use crate::error::LanaError;
use crate::models::{Money, TransactionKind};

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Auto,
}

/// How often automatic backups run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Daily,
    #[default]
    Weekly,
    Monthly,
}

/// Notification preferences as shown on the settings screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    /// Master switch
    pub enabled: bool,
    pub budget_alerts: bool,
    pub goal_reminders: bool,
    pub payment_reminders: bool,
    pub weekly_reports: bool,
    pub daily_tips: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            budget_alerts: true,
            goal_reminders: true,
            payment_reminders: true,
            weekly_reports: true,
            daily_tips: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecuritySettings {
    pub biometric_auth: bool,
    pub auto_lock: bool,
    /// Minutes of inactivity before locking
    pub lock_timeout: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            biometric_auth: false,
            auto_lock: true,
            lock_timeout: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrivacySettings {
    pub analytics_enabled: bool,
    pub crash_reporting: bool,
    pub personalized_tips: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            analytics_enabled: true,
            crash_reporting: true,
            personalized_tips: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackupSettings {
    pub auto_backup: bool,
    pub backup_frequency: BackupFrequency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_backup: Option<NaiveDate>,
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            auto_backup: true,
            backup_frequency: BackupFrequency::Weekly,
            last_backup: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    pub show_decimals: bool,
    pub compact_mode: bool,
    pub chart_animations: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_decimals: true,
            compact_mode: false,
            chart_animations: true,
        }
    }
}

/// Application-wide preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// ISO 4217 currency code
    pub currency: String,
    /// BCP 47 locale tag, e.g. `es-MX`
    pub locale: String,
    pub theme: Theme,
    pub notifications: NotificationPreferences,
    pub security: SecuritySettings,
    pub privacy: PrivacySettings,
    pub backup: BackupSettings,
    pub display: DisplaySettings,
    /// Base URL of the account API
    pub api_base_url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            currency: "MXN".to_string(),
            locale: "es-MX".to_string(),
            theme: Theme::Dark,
            notifications: NotificationPreferences::default(),
            security: SecuritySettings::default(),
            privacy: PrivacySettings::default(),
            backup: BackupSettings::default(),
            display: DisplaySettings::default(),
            api_base_url: "http://localhost:8000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePreferences {
    pub default_transaction_type: TransactionKind,
    pub default_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_budget_target: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_goal_target: Option<Money>,
}

impl Default for ProfilePreferences {
    fn default() -> Self {
        Self {
            default_transaction_type: TransactionKind::Expense,
            default_category: "Otros".to_string(),
            monthly_budget_target: Some(Money::from_units(10_000)),
            savings_goal_target: Some(Money::from_units(20_000)),
        }
    }
}

/// Running counters shown on the profile screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileStats {
    pub total_transactions: u64,
    pub total_saved: Money,
    pub goals_completed: u32,
    pub streak_days: u32,
}

/// The local user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub join_date: NaiveDate,
    pub preferences: ProfilePreferences,
    pub stats: ProfileStats,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "user_001".to_string(),
            name: "Usuario".to_string(),
            email: "usuario@example.com".to_string(),
            avatar: None,
            join_date: Utc::now().date_naive(),
            preferences: ProfilePreferences::default(),
            stats: ProfileStats::default(),
        }
    }
}

/// Contents of `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub app: AppSettings,

    #[serde(default)]
    pub profile: UserProfile,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            app: AppSettings::default(),
            profile: UserProfile::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &LanaPaths) -> Result<Self, LanaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LanaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LanaError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Not persisted until the caller saves
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LanaPaths) -> Result<(), LanaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LanaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LanaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
