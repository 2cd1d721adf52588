//! Credence CLI: Operate a local credential trust network.
//!
//! Subcommands: init, register-institution, verify-institution, add-admin,
//! remove-admin, institution, issue, revoke, credential, valid, report,
//! process-report, add-pattern, fraud-report, pattern, transfer-admin.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::Session;
use config::CredenceConfig;

/// Credence: Credential trust network.
#[derive(Parser, Debug)]
#[command(name = "credence", version, about, long_about = None)]
struct Cli {
    /// Path to config file.
    #[arg(short, long, global = true, default_value = "credence.toml")]
    config: PathBuf,

    /// Data directory (overrides config).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (overrides config).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Register a new institution.
    RegisterInstitution(commands::institution::RegisterArgs),
    /// Mark an institution as verified.
    VerifyInstitution(commands::institution::VerifyArgs),
    /// Grant an address admin rights on an institution.
    AddAdmin(commands::institution::GrantArgs),
    /// Deactivate an institution admin grant.
    RemoveAdmin(commands::institution::GrantArgs),
    /// Show an institution.
    Institution(commands::institution::ShowArgs),
    /// Issue a credential.
    Issue(commands::credential::IssueArgs),
    /// Revoke a credential.
    Revoke(commands::credential::RevokeArgs),
    /// Show a credential.
    Credential(commands::credential::ShowArgs),
    /// Check whether a credential is valid at a height.
    Valid(commands::credential::ValidArgs),
    /// Report a credential as fraudulent.
    Report(commands::fraud::ReportArgs),
    /// Resolve a pending fraud report.
    ProcessReport(commands::fraud::ProcessArgs),
    /// Record a suspicious pattern.
    AddPattern(commands::fraud::PatternArgs),
    /// Show a fraud report.
    FraudReport(commands::fraud::ShowReportArgs),
    /// Show a suspicious pattern.
    Pattern(commands::fraud::ShowPatternArgs),
    /// Transfer the network admin role.
    TransferAdmin(commands::admin::TransferArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Init(args) = &cli.command {
        return commands::init::run(args);
    }

    let mut config = CredenceConfig::load(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_tracing(&config);

    let session = Session::open(&config)?;

    match &cli.command {
        Commands::Init(_) => Ok(()),
        Commands::RegisterInstitution(args) => commands::institution::register(&session, args),
        Commands::VerifyInstitution(args) => commands::institution::verify(&session, args),
        Commands::AddAdmin(args) => commands::institution::add_admin(&session, args),
        Commands::RemoveAdmin(args) => commands::institution::remove_admin(&session, args),
        Commands::Institution(args) => commands::institution::show(&session, args),
        Commands::Issue(args) => commands::credential::issue(&session, args),
        Commands::Revoke(args) => commands::credential::revoke(&session, args),
        Commands::Credential(args) => commands::credential::show(&session, args),
        Commands::Valid(args) => commands::credential::valid(&session, args),
        Commands::Report(args) => commands::fraud::report(&session, args),
        Commands::ProcessReport(args) => commands::fraud::process(&session, args),
        Commands::AddPattern(args) => commands::fraud::add_pattern(&session, args),
        Commands::FraudReport(args) => commands::fraud::show_report(&session, args),
        Commands::Pattern(args) => commands::fraud::show_pattern(&session, args),
        Commands::TransferAdmin(args) => commands::admin::run(&session, args),
    }
}

fn init_tracing(config: &CredenceConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
