//! Match command: look a single name up in the roster

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::format_candidate_list;
use crate::error::FundingResult;
use crate::import::load_roster_into;
use crate::services::matcher::{exact_match, find_matches_with};
use crate::services::registry::RosterRegistry;

/// Arguments for `match`
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Child name to look up
    pub name: String,

    /// Roster file(s) (CSV)
    #[arg(short, long = "roster", required = true)]
    pub rosters: Vec<PathBuf>,

    /// Maximum candidates when the best match shares more than one word
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Handle the match command
pub fn handle_match_command(settings: &Settings, args: MatchArgs) -> FundingResult<()> {
    let mut registry = RosterRegistry::new();
    for path in &args.rosters {
        load_roster_into(&mut registry, path)?;
    }
    let roster = registry.names();

    if let Some(found) = exact_match(&args.name, &roster) {
        println!("Exact match: {}", found);
        return Ok(());
    }

    let mut limits = settings.match_limits();
    if let Some(limit) = args.limit.filter(|l| *l > 0) {
        limits.max_results = limit;
    }

    println!("No exact match for '{}'.", args.name);
    println!();
    println!("Possible Matches");
    print!("{}", format_candidate_list(&find_matches_with(&args.name, &roster, limits)));
    Ok(())
}
