use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use funding_recon::cli::{
    handle_blocks_command, handle_config_command, handle_match_command, handle_reconcile_command,
    BlocksArgs, ConfigArgs, MatchArgs, ReconcileArgs,
};
use funding_recon::config::{paths::ReconPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "fundrecon",
    version,
    about = "Reconcile childcare funding allocations against entitlement windows",
    long_about = "fundrecon consolidates weekly funding allocations into contiguous \
                  blocks inside each child's 52-week entitlement window, picks the \
                  base claim and top-ups, and matches children against the main \
                  system's roster."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile children, funding and roster tables and write export files
    Reconcile(ReconcileArgs),

    /// Look a child name up in the roster
    Match(MatchArgs),

    /// Show consolidated funding blocks for one child
    Blocks(BlocksArgs),

    /// Show current configuration and paths
    Config(ConfigArgs),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "funding_recon=info".into()),
    );

    // stdout carries reports and prompts
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let paths = ReconPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Reconcile(args)) => handle_reconcile_command(&settings, args)?,
        Some(Commands::Match(args)) => handle_match_command(&settings, args)?,
        Some(Commands::Blocks(args)) => handle_blocks_command(&settings, args)?,
        Some(Commands::Config(args)) => handle_config_command(&paths, &settings, args)?,
        None => {
            println!("fundrecon - childcare funding reconciliation");
            println!();
            println!("Run 'fundrecon --help' for usage information.");
        }
    }

    Ok(())
}
