//! Config command: show paths and effective settings

use clap::Args;

use crate::config::{ReconPaths, Settings};
use crate::error::FundingResult;

/// Arguments for `config`
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Write the effective settings to the settings file
    #[arg(long)]
    pub init: bool,
}

/// Handle the config command
pub fn handle_config_command(
    paths: &ReconPaths,
    settings: &Settings,
    args: ConfigArgs,
) -> FundingResult<()> {
    if args.init {
        settings.save(paths)?;
        tracing::info!(path = %paths.settings_file().display(), "Wrote settings file");
    }

    println!("funding-recon Configuration");
    println!("===========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!(
        "Settings file:    {}{}",
        paths.settings_file().display(),
        if paths.is_initialized() { "" } else { " (not created, using defaults)" }
    );
    println!();
    println!("Settings:");
    println!("  Date format:               {}", settings.date_format);
    println!("  Currency symbol:           {}", settings.currency_symbol);
    println!("  Max candidates:            {}", settings.max_candidates);
    println!("  Weak match candidates:     {}", settings.weak_match_candidates);
    println!("  Report candidate columns:  {}", settings.report_candidates);
    println!("  Include unmatched funding: {}", settings.include_unmatched_funding);
    println!("  Output directory:          {}", settings.output_dir);
    Ok(())
}
