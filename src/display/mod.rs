//! Display formatting for terminal output
//!
//! Builds plain-text tables and screens for the CLI handlers to print.

pub mod blocks;
pub mod matches;
pub mod summary;

pub use blocks::format_consolidation;
pub use matches::{format_candidate_list, format_resolution_screen, format_session_summary};
pub use summary::{format_no_funding_list, format_run_summary};
