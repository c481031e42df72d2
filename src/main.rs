use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mission_tracker::cli::{
    handle_audit_command, handle_export_command, handle_mission_command,
    handle_transaction_command, AuditCommands, ExportCommands, MissionCommands, Session,
    TransactionCommands,
};
use mission_tracker::clock::SystemClock;
use mission_tracker::config::{paths::TrackerPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "mission",
    author = "Kaylee Beyene",
    version,
    about = "Balance tracker with a rolling 14-day spending mission",
    long_about = "Track deposits and expenses against a running balance, and keep \
                  spending on target through a rolling 14-day mission with a daily \
                  budget."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Transaction(TransactionCommands),

    #[command(flatten)]
    Mission(MissionCommands),

    #[command(flatten)]
    Export(ExportCommands),

    /// Audit log commands
    #[command(subcommand)]
    Audit(AuditCommands),

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let command = match cli.command {
        Some(Commands::Config) => {
            print_config(&paths, &settings);
            return Ok(());
        }
        Some(command) => command,
        None => {
            println!("Mission Tracker - balance and 14-day spending mission");
            println!();
            println!("Run 'mission --help' for usage information.");
            println!("Run 'mission status' to see today's mission.");
            return Ok(());
        }
    };

    let mut session = Session::open(&paths, settings, Box::new(SystemClock))?;

    let result = match command {
        Commands::Transaction(cmd) => handle_transaction_command(&mut session, cmd),
        Commands::Mission(cmd) => handle_mission_command(&mut session, cmd),
        Commands::Export(cmd) => handle_export_command(&mut session, cmd),
        Commands::Audit(cmd) => handle_audit_command(&session, cmd),
        Commands::Config => Ok(()),
    };

    // Record whatever changed, even if the command itself failed
    session.record_events()?;
    result?;
    Ok(())
}

fn print_config(paths: &TrackerPaths, settings: &Settings) {
    println!("Mission Tracker Configuration");
    println!("=============================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("State file:     {}", paths.state_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:       {}", settings.currency_symbol);
    println!("  Date format:           {}", settings.date_format);
    println!("  Tick interval:         {}s", settings.tick_interval_secs);
    println!("  Autosave interval:     {}s", settings.autosave_interval_secs);
    println!("  Recent transactions:   {}", settings.recent_transactions);
}
