use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lana_cli::api::UserCreateRequest;
use lana_cli::cli::{self, Context};
use lana_cli::config::{LanaPaths, Settings};
use lana_cli::models::{predefined_categories, Money, TransactionKind};
use lana_cli::reports::ReportPeriod;
use lana_cli::services::DateStyle;
use lana_cli::storage::initialize_storage;

#[derive(Parser)]
#[command(
    name = "lana",
    author = "LanaApp Team",
    version,
    about = "Personal finance tracking from the command line",
    long_about = "Lana keeps track of income, expenses, budgets, savings goals and \
                  recurring payments. It validates spending against your budgets, \
                  raises reminders and builds period reports from a JSON ledger."
)]
struct Cli {
    /// Ledger file to read instead of the one in the data directory
    #[arg(long, global = true, env = "LANA_LEDGER")]
    data: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the settings and ledger files
    Init {
        /// Start with an empty ledger instead of the sample data
        #[arg(long)]
        empty: bool,
    },

    /// Show or change configuration
    #[command(subcommand)]
    Config(cli::ConfigCommands),

    /// Check a transaction against the balance and its category budget
    Validate {
        category: String,
        #[arg(value_parser = cli::parse_money, allow_hyphen_values = true)]
        amount: Money,
        #[arg(short, long, default_value = "expense")]
        kind: TransactionKind,
    },

    /// This month's spending in one category
    Analyze { category: String },

    /// Monthly financial summary
    Summary,

    /// Budget status for the current period
    Budgets,

    /// List transactions, newest first
    #[command(alias = "txn")]
    Transactions(cli::TransactionFilter),

    /// Totals for a month (YYYY-MM)
    Totals { month: Option<String> },

    /// Financial report for a period
    Report {
        /// week, month, quarter or year
        #[arg(short, long, default_value = "month")]
        period: ReportPeriod,
        #[arg(short, long, value_enum, default_value_t)]
        format: cli::ReportFormat,
        /// Write the report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Financial health score
    Health(cli::HealthArgs),

    /// Run the notification rules
    Notify,

    /// Savings goals
    Goals,

    /// Recurring payments
    Payments,

    /// The predefined categories
    Categories,

    /// Format an amount or a date with the current settings
    Format {
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// short, medium or long
        #[arg(short, long, default_value = "medium")]
        style: DateStyle,
        /// Check an email address
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign in to your Lana account
    Login {
        email: String,
        #[arg(short, long, env = "LANA_PASSWORD", hide_env_values = true)]
        password: String,
        /// Auth API base URL, overriding the configured one
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Create a Lana account
    Register {
        name: String,
        email: String,
        #[arg(short, long, env = "LANA_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Forget the stored session
    Logout,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LANA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = LanaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "paths resolved");

    let ctx = Context::new(paths, settings, cli.data, cli.today);

    match cli.command {
        Some(Commands::Init { empty }) => {
            println!("Initializing Lana at: {}", ctx.paths.base_dir().display());
            let created = initialize_storage(&ctx.paths, !empty)?;
            ctx.settings.save(&ctx.paths)?;
            if created {
                println!("Ledger created: {}", ctx.paths.ledger_file().display());
                if !empty {
                    println!("Sample transactions, budgets, goals and payments were added.");
                }
            } else {
                println!("Ledger already exists, left untouched.");
            }
            println!();
            println!("Run 'lana summary' to see this month.");
        }
        Some(Commands::Config(cmd)) => cli::handle_config_command(&ctx, cmd)?,
        Some(Commands::Validate {
            category,
            amount,
            kind,
        }) => cli::handle_validate(&ctx, &category, amount, kind)?,
        Some(Commands::Analyze { category }) => cli::handle_analyze(&ctx, &category)?,
        Some(Commands::Summary) => cli::handle_summary(&ctx)?,
        Some(Commands::Budgets) => cli::handle_budgets(&ctx)?,
        Some(Commands::Transactions(filter)) => cli::handle_transactions(&ctx, filter)?,
        Some(Commands::Totals { month }) => cli::handle_totals(&ctx, month)?,
        Some(Commands::Report {
            period,
            format,
            output,
        }) => cli::handle_report(&ctx, period, format, output)?,
        Some(Commands::Health(args)) => cli::handle_health(&ctx, &args)?,
        Some(Commands::Notify) => cli::handle_notify(&ctx)?,
        Some(Commands::Goals) => cli::handle_goals(&ctx)?,
        Some(Commands::Payments) => cli::handle_payments(&ctx)?,
        Some(Commands::Categories) => {
            for category in predefined_categories() {
                println!("{} {:<16} {}", category.icon, category.name, category.color);
            }
        }
        Some(Commands::Format {
            amount,
            date,
            style,
            email,
        }) => cli::handle_format(&ctx, amount.as_deref(), date, style, email.as_deref())?,
        Some(Commands::Login {
            email,
            password,
            api_url,
        }) => cli::handle_login(&ctx, &email, &password, api_url.as_deref())?,
        Some(Commands::Register {
            name,
            email,
            password,
            phone,
            api_url,
        }) => {
            let request = UserCreateRequest::new(&name, &email, &password, &phone);
            cli::handle_register(&ctx, &request, api_url.as_deref())?
        }
        Some(Commands::Logout) => cli::handle_logout(&ctx)?,
        None => {
            println!("Lana - personal finance from the command line");
            println!();
            println!("Run 'lana --help' for usage information.");
            println!("Run 'lana init' to create a ledger with sample data.");
        }
    }

    Ok(())
}
