//! Blocks command: show one child's consolidated funding

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::format_consolidation;
use crate::error::{FundingError, FundingResult};
use crate::import::{load_allocations, parse_date};
use crate::models::EntitlementWindow;
use crate::services::allocation::parse_rows;
use crate::services::consolidation::consolidate;

/// Arguments for `blocks`
#[derive(Args, Debug)]
pub struct BlocksArgs {
    /// Funding allocation table (CSV)
    #[arg(short, long)]
    pub funding: PathBuf,

    /// Child name as written in the funding table
    #[arg(short, long)]
    pub child: String,

    /// Claim expiry date (e.g. 17/08/2025)
    #[arg(long)]
    pub claim_until: String,
}

/// Handle the blocks command
pub fn handle_blocks_command(settings: &Settings, args: BlocksArgs) -> FundingResult<()> {
    let claim_until = parse_date(&args.claim_until).ok_or_else(|| {
        FundingError::Validation(format!(
            "Invalid claim expiry date: '{}'. Use a format like 17/08/2025",
            args.claim_until
        ))
    })?;
    let window = EntitlementWindow::from_claim_until(claim_until);

    let wanted = args.child.trim();
    let rows: Vec<_> = load_allocations(&args.funding)?
        .into_iter()
        .filter(|row| row.belongs_to(wanted))
        .collect();

    if rows.is_empty() {
        println!("No allocation rows for '{}'.", args.child);
        return Ok(());
    }

    let parsed = parse_rows(&rows);
    println!("Child: {}", args.child);
    println!(
        "Rows: {} read, {} without a date, {} with an unrecognised description",
        rows.len(),
        parsed.missing_dates,
        parsed.unparseable
    );
    println!();

    let consolidation = consolidate(&parsed.facts, &window);
    print!(
        "{}",
        format_consolidation(
            &consolidation,
            &window,
            &settings.currency_symbol,
            &settings.date_format
        )
    );
    Ok(())
}
