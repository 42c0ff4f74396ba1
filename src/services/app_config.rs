//! App configuration service
//!
//! Holds the user's settings and profile and formats money and dates the way
//! the configured locale and currency expect.

use std::rc::Rc;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use iso_currency::Currency;
use num_format::{Locale, ToFormattedString};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::settings::{AppSettings, ProfileStats, UserProfile};
use crate::error::{LanaError, LanaResult};
use crate::models::Money;
use crate::services::clock::Clock;
use crate::services::health::{financial_health_score, HealthInput, HealthScore};
use crate::services::notification::NotificationSettings;

/// Largest amount `validate_amount` accepts, in whole units
pub const MAX_AMOUNT: f64 = 999_999_999.0;

/// Version stamped into exported backups
pub const EXPORT_VERSION: &str = "1.0.0";

/// Date rendering styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `15/1/25`
    Short,
    /// `15 ene 2025`
    #[default]
    Medium,
    /// `15 de enero de 2025`
    Long,
}

impl std::str::FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(format!("Unknown date style: {}", other)),
        }
    }
}

/// Outcome of validating a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl FieldValidation {
    fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    fn invalid(error: &str) -> Self {
        Self {
            is_valid: false,
            error: Some(error.to_string()),
        }
    }
}

/// A boolean setting exposed as a one-tap toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickSetting {
    pub key: &'static str,
    pub label: &'static str,
    pub value: bool,
    pub description: &'static str,
}

/// Backup document produced by `export_data`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigBackup {
    pub settings: AppSettings,
    pub profile: UserProfile,
    pub export_date: DateTime<Utc>,
    pub version: String,
}

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Service holding settings and profile
pub struct AppConfigService {
    clock: Rc<dyn Clock>,
    settings: AppSettings,
    profile: UserProfile,
}

impl AppConfigService {
    /// Defaults, with the profile joined today
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        let profile = UserProfile {
            join_date: clock.today(),
            ..UserProfile::default()
        };
        Self {
            clock,
            settings: AppSettings::default(),
            profile,
        }
    }

    /// Start from previously saved settings and profile
    pub fn with_state(clock: Rc<dyn Clock>, settings: AppSettings, profile: UserProfile) -> Self {
        Self {
            clock,
            settings,
            profile,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency
    }

    pub fn locale(&self) -> &str {
        &self.settings.locale
    }

    /// Rule toggles for the notification service, after the master switch
    pub fn notification_settings(&self) -> NotificationSettings {
        let prefs = &self.settings.notifications;
        if !prefs.enabled {
            return NotificationSettings::disabled();
        }
        NotificationSettings {
            budget_warnings: prefs.budget_alerts,
            goal_reminders: prefs.goal_reminders,
            payment_due: prefs.payment_reminders,
            weekly_reports: prefs.weekly_reports,
            achievements: true,
            daily_tips: prefs.daily_tips,
            expense_alerts: prefs.budget_alerts,
        }
    }

    pub fn update_settings(&mut self, update: impl FnOnce(&mut AppSettings)) {
        update(&mut self.settings);
        self.save_settings();
    }

    pub fn update_profile(&mut self, update: impl FnOnce(&mut UserProfile)) {
        update(&mut self.profile);
        self.save_profile();
    }

    pub fn update_profile_stats(&mut self, update: impl FnOnce(&mut ProfileStats)) {
        update(&mut self.profile.stats);
        self.save_profile();
    }

    pub fn increment_transaction_count(&mut self) {
        self.update_profile_stats(|stats| stats.total_transactions += 1);
    }

    pub fn add_to_total_saved(&mut self, amount: Money) {
        self.update_profile_stats(|stats| stats.total_saved += amount);
    }

    pub fn increment_goals_completed(&mut self) {
        self.update_profile_stats(|stats| stats.goals_completed += 1);
    }

    /// A positive action extends the streak; anything else resets it
    pub fn update_streak(&mut self, positive: bool) {
        self.update_profile_stats(|stats| {
            if positive {
                stats.streak_days += 1;
            } else {
                stats.streak_days = 0;
            }
        });
    }

    pub fn reset_settings(&mut self) {
        self.settings = AppSettings::default();
        self.save_settings();
    }

    /// Format an amount in the configured currency and locale
    pub fn format_currency(&self, amount: Money, show_symbol: bool) -> String {
        let locale = resolve_locale(&self.settings.locale);
        let cents = amount.cents().abs();

        let digits = if self.settings.display.show_decimals {
            format!(
                "{}{}{:02}",
                (cents / 100).to_formatted_string(&locale),
                locale.decimal(),
                cents % 100
            )
        } else {
            // Round half away from zero to whole units
            ((cents + 50) / 100).to_formatted_string(&locale)
        };

        let symbol = if show_symbol {
            currency_symbol(&self.settings.currency)
        } else {
            String::new()
        };
        let sign = if amount.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, symbol, digits)
    }

    /// Format a date in the configured locale's language
    pub fn format_date(&self, date: NaiveDate, style: DateStyle) -> String {
        let english = self.is_english();
        let month_index = date.month0() as usize;
        let (day, month, year) = (date.day(), date.month(), date.year());

        match (style, english) {
            (DateStyle::Short, false) => format!("{}/{}/{:02}", day, month, year % 100),
            (DateStyle::Short, true) => format!("{}/{}/{:02}", month, day, year % 100),
            (DateStyle::Medium, false) => {
                format!("{} {} {}", day, short_month(MONTHS_ES[month_index]), year)
            }
            (DateStyle::Medium, true) => {
                format!("{} {}, {}", short_month(MONTHS_EN[month_index]), day, year)
            }
            (DateStyle::Long, false) => {
                format!("{} de {} de {}", day, MONTHS_ES[month_index], year)
            }
            (DateStyle::Long, true) => format!("{} {}, {}", MONTHS_EN[month_index], day, year),
        }
    }

    /// Medium date plus 24-hour time
    pub fn format_date_time(&self, timestamp: DateTime<Utc>) -> String {
        format!(
            "{}, {}",
            self.format_date(timestamp.date_naive(), DateStyle::Medium),
            timestamp.format("%H:%M")
        )
    }

    /// Check a user-typed amount
    pub fn validate_amount(&self, input: &str) -> FieldValidation {
        let amount = match parse_leading_number(input) {
            Some(value) => value,
            None => return FieldValidation::invalid("Cantidad inválida"),
        };

        if amount < 0.0 {
            FieldValidation::invalid("La cantidad no puede ser negativa")
        } else if amount > MAX_AMOUNT {
            FieldValidation::invalid("La cantidad es demasiado grande")
        } else {
            FieldValidation::ok()
        }
    }

    pub fn validate_email(&self, email: &str) -> FieldValidation {
        if email_regex().is_match(email) {
            FieldValidation::ok()
        } else {
            FieldValidation::invalid("Email inválido")
        }
    }

    pub fn financial_health_score(&self, input: &HealthInput) -> HealthScore {
        financial_health_score(input)
    }

    /// The boolean settings shown on the quick settings panel
    pub fn quick_settings(&self) -> Vec<QuickSetting> {
        vec![
            QuickSetting {
                key: "notifications.enabled",
                label: "Notificaciones",
                value: self.settings.notifications.enabled,
                description: "Recibir notificaciones de la app",
            },
            QuickSetting {
                key: "security.biometricAuth",
                label: "Autenticación Biométrica",
                value: self.settings.security.biometric_auth,
                description: "Usar huella dactilar o Face ID",
            },
            QuickSetting {
                key: "backup.autoBackup",
                label: "Backup Automático",
                value: self.settings.backup.auto_backup,
                description: "Respaldar datos automáticamente",
            },
            QuickSetting {
                key: "display.chartAnimations",
                label: "Animaciones de Gráficas",
                value: self.settings.display.chart_animations,
                description: "Mostrar animaciones en las gráficas",
            },
        ]
    }

    /// Set a boolean setting by its dotted key
    pub fn update_quick_setting(&mut self, key: &str, value: bool) -> LanaResult<()> {
        let settings = &mut self.settings;
        let slot = match key {
            "notifications.enabled" => &mut settings.notifications.enabled,
            "notifications.budgetAlerts" => &mut settings.notifications.budget_alerts,
            "notifications.goalReminders" => &mut settings.notifications.goal_reminders,
            "notifications.paymentReminders" => &mut settings.notifications.payment_reminders,
            "notifications.weeklyReports" => &mut settings.notifications.weekly_reports,
            "notifications.dailyTips" => &mut settings.notifications.daily_tips,
            "security.biometricAuth" => &mut settings.security.biometric_auth,
            "security.autoLock" => &mut settings.security.auto_lock,
            "privacy.analyticsEnabled" => &mut settings.privacy.analytics_enabled,
            "privacy.crashReporting" => &mut settings.privacy.crash_reporting,
            "privacy.personalizedTips" => &mut settings.privacy.personalized_tips,
            "backup.autoBackup" => &mut settings.backup.auto_backup,
            "display.showDecimals" => &mut settings.display.show_decimals,
            "display.compactMode" => &mut settings.display.compact_mode,
            "display.chartAnimations" => &mut settings.display.chart_animations,
            _ => return Err(LanaError::setting_not_found(key)),
        };
        *slot = value;
        self.save_settings();
        Ok(())
    }

    /// Settings and profile as a pretty-printed JSON backup
    pub fn export_data(&self) -> LanaResult<String> {
        let backup = ConfigBackup {
            settings: self.settings.clone(),
            profile: self.profile.clone(),
            export_date: self.clock.now(),
            version: EXPORT_VERSION.to_string(),
        };
        Ok(serde_json::to_string_pretty(&backup)?)
    }

    /// Replace settings and profile from a backup; missing fields take defaults
    pub fn import_data(&mut self, json: &str) -> LanaResult<()> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|_| LanaError::Validation("Error al importar datos".into()))?;

        let (settings, profile) = match (value.get("settings"), value.get("profile")) {
            (Some(settings), Some(profile)) if settings.is_object() && profile.is_object() => {
                (settings.clone(), profile.clone())
            }
            _ => return Err(LanaError::Validation("Datos de backup inválidos".into())),
        };

        let invalid = |_| LanaError::Validation("Error al importar datos".into());
        self.settings = serde_json::from_value(settings).map_err(invalid)?;
        self.profile = serde_json::from_value(profile).map_err(invalid)?;

        self.save_settings();
        self.save_profile();
        Ok(())
    }

    fn is_english(&self) -> bool {
        self.settings.locale.to_lowercase().starts_with("en")
    }

    fn save_settings(&self) {
        info!(currency = %self.settings.currency, locale = %self.settings.locale, "settings saved");
        debug!(settings = ?self.settings);
    }

    fn save_profile(&self) {
        info!(profile = %self.profile.id, "profile saved");
        debug!(profile = ?self.profile);
    }
}

/// Currency symbol for an ISO code; unknown codes render as `CODE `
pub fn currency_symbol(code: &str) -> String {
    match Currency::from_code(&code.to_uppercase()) {
        Some(currency) => currency.symbol().to_string(),
        None => format!("{} ", code),
    }
}

/// num-format locale for a BCP 47 tag, falling back to the language, then English
fn resolve_locale(tag: &str) -> Locale {
    Locale::from_name(tag)
        .or_else(|_| Locale::from_name(tag.split(['-', '_']).next().unwrap_or(tag)))
        .unwrap_or(Locale::en)
}

fn short_month(name: &str) -> &str {
    name.get(..3).unwrap_or(name)
}

/// Month name for a 1-based month, in Spanish unless `english`
pub fn month_name(month: u32, english: bool) -> &'static str {
    let names = if english { &MONTHS_EN } else { &MONTHS_ES };
    names[(month.clamp(1, 12) - 1) as usize]
}

/// Three-letter month abbreviation (`ene`, `Jan`)
pub fn month_abbrev(month: u32, english: bool) -> &'static str {
    short_month(month_name(month, english))
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hardcoded email regex should be valid")
    })
}

/// Parse the longest numeric prefix, the way a lenient form field reads input
///
/// Accepts an optional sign, then `Infinity` or a decimal with an optional
/// exponent. Anything after the prefix is ignored.
pub fn parse_leading_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if rest.starts_with("Infinity") {
        return Some(sign * f64::INFINITY);
    }

    let bytes = rest.as_bytes();
    let digits_from = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |tail| tail.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let int_len = digits_from(0);
    let mut end = int_len;
    if bytes.get(end) == Some(&b'.') {
        let frac_len = digits_from(end + 1);
        if frac_len > 0 {
            end += 1 + frac_len;
        } else if int_len == 0 {
            return None;
        }
    }
    if end == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_len = digits_from(exponent);
        if exponent_len > 0 {
            end = exponent + exponent_len;
        }
    }

    rest[..end].parse::<f64>().ok().map(|value| sign * value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clock::FixedClock;
    use chrono::TimeZone;

    fn service() -> AppConfigService {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        AppConfigService::new(Rc::new(FixedClock::on(date)))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_currency_usd() {
        let mut config = service();
        config.update_settings(|s| {
            s.currency = "USD".into();
            s.locale = "en".into();
        });

        assert_eq!(config.format_currency(Money::from_cents(123456), true), "$1,234.56");
        assert_eq!(config.format_currency(Money::from_cents(123456), false), "1,234.56");
        assert_eq!(config.format_currency(Money::from_cents(-5), true), "-$0.05");

        config.update_settings(|s| s.display.show_decimals = false);
        assert_eq!(config.format_currency(Money::from_cents(123456), true), "$1,235");
    }

    #[test]
    fn test_currency_symbol_fallback() {
        assert_eq!(currency_symbol("USD"), "$");
        assert_eq!(currency_symbol("XYZ"), "XYZ ");
    }

    #[test]
    fn test_format_date_spanish() {
        let config = service();
        let day = date(2025, 1, 15);
        assert_eq!(config.format_date(day, DateStyle::Short), "15/1/25");
        assert_eq!(config.format_date(day, DateStyle::Medium), "15 ene 2025");
        assert_eq!(config.format_date(day, DateStyle::Long), "15 de enero de 2025");
    }

    #[test]
    fn test_format_date_english() {
        let mut config = service();
        config.update_settings(|s| s.locale = "en-US".into());
        let day = date(2025, 9, 3);
        assert_eq!(config.format_date(day, DateStyle::Short), "9/3/25");
        assert_eq!(config.format_date(day, DateStyle::Medium), "Sep 3, 2025");
        assert_eq!(config.format_date(day, DateStyle::Long), "September 3, 2025");
    }

    #[test]
    fn test_format_date_time() {
        let config = service();
        let ts = Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 0).unwrap();
        assert_eq!(config.format_date_time(ts), "15 ene 2025, 14:30");
    }

    #[test]
    fn test_validate_amount() {
        let config = service();
        assert!(config.validate_amount("150.50").is_valid);
        assert!(config.validate_amount("0").is_valid);
        assert!(config.validate_amount("12abc").is_valid);
        assert_eq!(
            config.validate_amount("abc").error.as_deref(),
            Some("Cantidad inválida")
        );
        assert_eq!(
            config.validate_amount("").error.as_deref(),
            Some("Cantidad inválida")
        );
        assert_eq!(
            config.validate_amount("-5").error.as_deref(),
            Some("La cantidad no puede ser negativa")
        );
        assert_eq!(
            config.validate_amount("1000000000").error.as_deref(),
            Some("La cantidad es demasiado grande")
        );
        assert_eq!(
            config.validate_amount("1e10").error.as_deref(),
            Some("La cantidad es demasiado grande")
        );
        assert_eq!(
            config.validate_amount("Infinity").error.as_deref(),
            Some("La cantidad es demasiado grande")
        );
        assert!(config.validate_amount("1e3").is_valid);
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("12abc"), Some(12.0));
        assert_eq!(parse_leading_number(" .5 "), Some(0.5));
        assert_eq!(parse_leading_number("3."), Some(3.0));
        assert_eq!(parse_leading_number("2.5e2x"), Some(250.0));
        assert_eq!(parse_leading_number("7e"), Some(7.0));
        assert_eq!(parse_leading_number("-1E-2"), Some(-0.01));
        assert_eq!(parse_leading_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_leading_number("."), None);
        assert_eq!(parse_leading_number("e5"), None);
        assert_eq!(parse_leading_number("abc"), None);
    }

    #[test]
    fn test_validate_email() {
        let config = service();
        assert!(config.validate_email("ana@lana.mx").is_valid);
        assert!(!config.validate_email("ana@lana").is_valid);
        assert!(!config.validate_email("ana lana@x.mx").is_valid);
        assert_eq!(
            config.validate_email("nope").error.as_deref(),
            Some("Email inválido")
        );
    }

    #[test]
    fn test_profile_stats() {
        let mut config = service();
        config.increment_transaction_count();
        config.increment_transaction_count();
        config.add_to_total_saved(Money::from_units(500));
        config.increment_goals_completed();
        config.update_streak(true);
        config.update_streak(true);

        let stats = &config.profile().stats;
        assert_eq!(stats.total_transactions, 2);
        assert_eq!(stats.total_saved, Money::from_units(500));
        assert_eq!(stats.goals_completed, 1);
        assert_eq!(stats.streak_days, 2);

        config.update_streak(false);
        assert_eq!(config.profile().stats.streak_days, 0);
        assert_eq!(config.profile().join_date, date(2025, 1, 15));
    }

    #[test]
    fn test_quick_settings() {
        let mut config = service();
        assert_eq!(config.quick_settings().len(), 4);

        config.update_quick_setting("security.biometricAuth", true).unwrap();
        assert!(config.settings().security.biometric_auth);

        let err = config.update_quick_setting("security.pin", true).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_notification_master_switch() {
        let mut config = service();
        assert_eq!(config.notification_settings(), NotificationSettings::default());

        config.update_quick_setting("notifications.enabled", false).unwrap();
        assert_eq!(config.notification_settings(), NotificationSettings::disabled());
    }

    #[test]
    fn test_export_then_import() {
        let mut config = service();
        config.update_settings(|s| s.currency = "USD".into());
        config.update_profile(|p| p.name = "Ana".into());
        let exported = config.export_data().unwrap();
        assert!(exported.contains("\"version\": \"1.0.0\""));

        let mut other = service();
        other.import_data(&exported).unwrap();
        assert_eq!(other.settings().currency, "USD");
        assert_eq!(other.profile().name, "Ana");
    }

    #[test]
    fn test_import_rejects_bad_backups() {
        let mut config = service();

        let err = config.import_data(r#"{"settings": {}}"#).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Datos de backup inválidos");

        let err = config.import_data("not json").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Error al importar datos");
    }

    #[test]
    fn test_import_partial_fills_defaults() {
        let mut config = service();
        config
            .import_data(r#"{"settings": {"theme": "light"}, "profile": {"name": "Luis"}}"#)
            .unwrap();
        assert_eq!(config.settings().currency, "MXN");
        assert_eq!(config.profile().name, "Luis");
        assert_eq!(config.profile().id, "user_001");
    }

    #[test]
    fn test_reset_settings() {
        let mut config = service();
        config.update_settings(|s| s.currency = "EUR".into());
        config.reset_settings();
        assert_eq!(config.settings(), &AppSettings::default());
    }
}
