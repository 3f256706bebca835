//! User settings for funding-recon
//!
//! Every field has a default, so a partial or missing `config.json` is fine.
//! Command-line flags override what is loaded here.

use serde::{Deserialize, Serialize};

use super::paths::ReconPaths;
use crate::error::{FundingError, FundingResult};
use crate::export::is_valid_date_format;
use crate::services::matcher::{MatchLimits, DEFAULT_MAX_RESULTS, WEAK_MATCH_RESULTS};
use crate::services::reconciliation::ReconcileOptions;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Output date format (strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Currency symbol used when displaying rates
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Candidates returned when the best match shares more than one word
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Candidates returned when the best match shares a single word
    #[serde(default = "default_weak_match_candidates")]
    pub weak_match_candidates: usize,

    /// Candidate columns written to the unmatched report
    #[serde(default = "default_report_candidates")]
    pub report_candidates: usize,

    /// Emit funding records for children with no roster match
    #[serde(default)]
    pub include_unmatched_funding: bool,

    /// Directory export files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_max_candidates() -> usize {
    DEFAULT_MAX_RESULTS
}

fn default_weak_match_candidates() -> usize {
    WEAK_MATCH_RESULTS
}

fn default_report_candidates() -> usize {
    5
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            currency_symbol: default_currency(),
            max_candidates: default_max_candidates(),
            weak_match_candidates: default_weak_match_candidates(),
            report_candidates: default_report_candidates(),
            include_unmatched_funding: false,
            output_dir: default_output_dir(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &ReconPaths) -> FundingResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FundingError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FundingError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReconPaths) -> FundingResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FundingError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FundingError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings that would make matching return nothing
    pub fn validate(&self) -> FundingResult<()> {
        if self.max_candidates == 0 || self.weak_match_candidates == 0 {
            return Err(FundingError::Config(
                "Candidate limits must be at least 1".into(),
            ));
        }
        if self.date_format.trim().is_empty() || !is_valid_date_format(&self.date_format) {
            return Err(FundingError::Config(format!(
                "Invalid date format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Fuzzy matching limits
    pub fn match_limits(&self) -> MatchLimits {
        MatchLimits {
            max_results: self.max_candidates,
            weak_match_results: self.weak_match_candidates,
        }
    }

    /// Options for a reconciliation run
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            limits: self.match_limits(),
            include_unmatched_funding: self.include_unmatched_funding,
        }
    }
}
