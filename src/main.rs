use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use finboard::api::HttpApi;
use finboard::cli::{
    handle_allocation_command, handle_analytics_command, handle_budget_command,
    handle_dashboard_command, handle_expense_command, handle_income_command,
    handle_login_command, handle_logout_command, handle_overview_command,
};
use finboard::config::{paths::FinboardPaths, settings::Settings};
use finboard::logging::init_tracing;
use finboard::state::AppState;
use finboard::storage::Storage;

#[derive(Parser)]
#[command(
    name = "finboard",
    version,
    about = "Personal finance dashboard for the terminal",
    long_about = "Finboard splits your monthly income across four budget buckets \
                  (essentials, growth, emergency, leisure), tracks category budgets \
                  against their limits, and charts where your money goes."
)]
struct Cli {
    /// Backend base URL (overrides settings and FINBOARD_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to the backend
    Login {
        /// Username or email
        username: String,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Bucket budget and alerts for a month
    #[command(alias = "dash")]
    Dashboard {
        /// Month ("current", "last" or YYYY-MM)
        period: Option<String>,
    },

    /// Bucket allocation percentages
    #[command(subcommand)]
    Allocation(finboard::cli::AllocationCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(finboard::cli::ExpenseCommands),

    /// Income management commands
    #[command(subcommand)]
    Income(finboard::cli::IncomeCommands),

    /// Category budget commands
    #[command(subcommand)]
    Budget(finboard::cli::BudgetCommands),

    /// Charts and exports
    #[command(subcommand)]
    Analytics(finboard::cli::AnalyticsCommands),

    /// Month, day and calendar summaries
    #[command(subcommand)]
    Overview(finboard::cli::OverviewCommands),

    /// Show current configuration and paths
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = FinboardPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_filter, cli.verbose);

    let api_url = settings.resolved_api_url(cli.api_url.as_deref());
    let api = HttpApi::new(&api_url, Duration::from_secs(settings.request_timeout_secs))?;
    let storage = Storage::new(paths.clone())?;
    let mut state = AppState::init(api, storage, settings);

    match cli.command {
        Some(Commands::Login { username }) => {
            handle_login_command(&mut state, &username).await?;
        }
        Some(Commands::Logout) => {
            handle_logout_command(&mut state)?;
        }
        Some(Commands::Dashboard { period }) => {
            handle_dashboard_command(&mut state, period.as_deref()).await?;
        }
        Some(Commands::Allocation(cmd)) => {
            handle_allocation_command(&mut state, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut state, cmd).await?;
        }
        Some(Commands::Income(cmd)) => {
            handle_income_command(&mut state, cmd).await?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&mut state, cmd).await?;
        }
        Some(Commands::Analytics(cmd)) => {
            handle_analytics_command(&mut state, cmd).await?;
        }
        Some(Commands::Overview(cmd)) => {
            handle_overview_command(&mut state, cmd).await?;
        }
        Some(Commands::Config) => {
            let settings = state.settings();
            println!("Finboard Configuration");
            println!("======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Local store:      {}", paths.local_store_file().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  API URL:         {}", api_url);
            println!("  Request timeout: {}s", settings.request_timeout_secs);
            println!("  Currency:        {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Signed in:       {}",
                state
                    .session()
                    .map(|s| s.user.username.as_str())
                    .unwrap_or("no")
            );
        }
        None => {
            println!("Finboard - personal finance dashboard");
            println!();
            println!("Run 'finboard --help' for usage information.");
            println!("Run 'finboard login <username>' to get started.");
        }
    }

    state.teardown();
    Ok(())
}
