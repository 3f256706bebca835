//! Reconcile command
//!
//! Loads the three tables, runs the reconciliation, optionally walks the
//! operator through unmatched children and writes the export files.

use std::io;
use std::path::PathBuf;

use clap::Args;

use super::operator::TerminalOperator;
use crate::config::Settings;
use crate::display::{format_no_funding_list, format_run_summary, format_session_summary};
use crate::error::FundingResult;
use crate::export::{export_all, ExportFormat};
use crate::import::{load_allocations, load_children, load_roster_into};
use crate::services::reconciliation::ReconciliationService;
use crate::services::registry::RosterRegistry;
use crate::services::resolver::resolve_interactively;

/// Arguments for `reconcile`
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Children table (CSV)
    #[arg(short, long)]
    pub children: PathBuf,

    /// Funding allocation table (CSV)
    #[arg(short, long)]
    pub funding: PathBuf,

    /// Roster file(s) from the main system (CSV); repeat for several sources
    #[arg(short, long = "roster", required = true)]
    pub rosters: Vec<PathBuf>,

    /// Directory for export files (defaults to the configured output_dir)
    #[arg(short, long, env = "FUNDING_RECON_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Ask an operator to resolve unmatched children
    #[arg(short, long)]
    pub interactive: bool,

    /// Also write report.json
    #[arg(long)]
    pub json: bool,

    /// Emit funding records for children with no roster match
    #[arg(long)]
    pub include_unmatched: bool,
}

/// Handle the reconcile command
pub fn handle_reconcile_command(settings: &Settings, args: ReconcileArgs) -> FundingResult<()> {
    let children = load_children(&args.children)?;
    let rows = load_allocations(&args.funding)?;

    let mut registry = RosterRegistry::new();
    for path in &args.rosters {
        load_roster_into(&mut registry, path)?;
    }
    if registry.is_empty() {
        tracing::warn!("Roster is empty; every child will be unmatched");
    }
    let roster = registry.names();

    let mut options = settings.reconcile_options();
    options.include_unmatched_funding |= args.include_unmatched;

    let service = ReconciliationService::new(&roster, options);
    let mut report = service.reconcile(&children, &rows);

    let unresolved = report.unresolved();
    if args.interactive && !unresolved.is_empty() {
        println!("Found {} children not matched in the roster", unresolved.len());

        let stdin = io::stdin();
        let mut operator = TerminalOperator::new(stdin.lock(), io::stdout());
        let outcome = resolve_interactively(&unresolved, &mut operator)?;

        println!();
        print!("{}", format_session_summary(&outcome, unresolved.len()));
        report.apply_manual_matches(&outcome.matches);
    }

    println!();
    println!("Summary");
    println!("=======");
    print!("{}", format_run_summary(&report.summary()));

    let no_funding = report.no_funding();
    if !no_funding.is_empty() {
        println!();
        print!("{}", format_no_funding_list(&no_funding));
    }

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&settings.output_dir));
    let written = export_all(
        &report,
        &ExportFormat::from_settings(settings),
        &output_dir,
        args.json,
    )?;

    println!();
    for path in written {
        println!("Saved {}", path.display());
    }

    Ok(())
}
