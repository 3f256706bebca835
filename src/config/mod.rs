//! Configuration module for funding-recon
//!
//! Resolves the configuration directory and loads user settings.

pub mod paths;
pub mod settings;

pub use paths::ReconPaths;
pub use settings::Settings;
