//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer.

pub mod blocks;
pub mod config;
pub mod matching;
pub mod operator;
pub mod reconcile;

pub use blocks::{handle_blocks_command, BlocksArgs};
pub use config::{handle_config_command, ConfigArgs};
pub use matching::{handle_match_command, MatchArgs};
pub use operator::TerminalOperator;
pub use reconcile::{handle_reconcile_command, ReconcileArgs};
