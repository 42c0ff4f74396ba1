//! Configuration CLI commands
//!
//! Showing and changing settings, JSON backup export and import, and the
//! formatting helpers.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use super::Context;
use crate::config::Settings;
use crate::error::{LanaError, LanaResult};
use crate::models::Money;
use crate::services::app_config::parse_leading_number;
use crate::services::{AppConfigService, DateStyle};

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show paths, settings and the quick toggles
    Show,

    /// Turn a boolean setting on or off (e.g. `display.showDecimals false`)
    Set {
        /// Dotted setting key
        key: String,
        /// true or false
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },

    /// Change the currency (ISO 4217 code)
    Currency { code: String },

    /// Change the locale (e.g. es-MX, en-US)
    Locale { tag: String },

    /// Write settings and profile as a JSON backup
    Export {
        /// File to write; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace settings and profile from a JSON backup
    Import { file: PathBuf },

    /// Restore default settings (the profile is kept)
    Reset,
}

fn config_service(ctx: &Context) -> AppConfigService {
    AppConfigService::with_state(
        ctx.clock.clone(),
        ctx.settings.app.clone(),
        ctx.settings.profile.clone(),
    )
}

fn persist(ctx: &Context, config: &AppConfigService) -> LanaResult<()> {
    let settings = Settings {
        app: config.settings().clone(),
        profile: config.profile().clone(),
        ..ctx.settings.clone()
    };
    settings.save(&ctx.paths)
}

pub fn handle_config_command(ctx: &Context, cmd: ConfigCommands) -> LanaResult<()> {
    let mut config = config_service(ctx);

    match cmd {
        ConfigCommands::Show => {
            show_config(ctx, &config);
            return Ok(());
        }
        ConfigCommands::Set { key, value } => {
            config.update_quick_setting(&key, value)?;
            println!("{} = {}", key, value);
        }
        ConfigCommands::Currency { code } => {
            let code = code.trim().to_uppercase();
            config.update_settings(|s| s.currency = code.clone());
            println!("Moneda: {}", code);
        }
        ConfigCommands::Locale { tag } => {
            config.update_settings(|s| s.locale = tag.trim().to_string());
            println!("Idioma: {}", config.locale());
        }
        ConfigCommands::Export { output } => {
            let json = config.export_data()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("Configuración exportada a: {}", path.display());
                }
                None => println!("{}", json),
            }
            return Ok(());
        }
        ConfigCommands::Import { file } => {
            let json = std::fs::read_to_string(&file)?;
            config.import_data(&json)?;
            println!("Configuración importada de: {}", file.display());
        }
        ConfigCommands::Reset => {
            config.reset_settings();
            println!("Configuración restablecida.");
        }
    }

    persist(ctx, &config)
}

fn show_config(ctx: &Context, config: &AppConfigService) {
    let settings = config.settings();

    println!("Lana Configuration");
    println!("==================");
    println!("Base directory:  {}", ctx.paths.base_dir().display());
    println!("Settings file:   {}", ctx.paths.settings_file().display());
    println!("Ledger file:     {}", ctx.ledger.path().display());
    println!();
    println!("Usuario:   {} <{}>", config.profile().name, config.profile().email);
    println!("Moneda:    {}", settings.currency);
    println!("Idioma:    {}", settings.locale);
    println!("Tema:      {:?}", settings.theme);
    println!("API:       {}", settings.api_base_url);
    println!();
    for quick in config.quick_settings() {
        println!(
            "[{}] {:<26} {} ({})",
            if quick.value { "x" } else { " " },
            quick.label,
            quick.key,
            quick.description
        );
    }
}

/// Format an amount and optionally a date the way the app displays them
pub fn handle_format(
    ctx: &Context,
    amount: Option<&str>,
    date: Option<NaiveDate>,
    style: DateStyle,
    email: Option<&str>,
) -> LanaResult<()> {
    let config = config_service(ctx);

    if let Some(input) = amount {
        let validation = config.validate_amount(input);
        if let Some(error) = validation.error {
            return Err(LanaError::Validation(error));
        }
        let value = parse_leading_number(input).unwrap_or_default();
        println!("{}", config.format_currency(Money::from_f64(value), true));
    }

    if let Some(date) = date {
        println!("{}", config.format_date(date, style));
    }

    if let Some(email) = email {
        let validation = config.validate_email(email);
        match validation.error {
            Some(error) => return Err(LanaError::Validation(error)),
            None => println!("✓ {}", email),
        }
    }

    Ok(())
}
