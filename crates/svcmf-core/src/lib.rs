pub mod check;
pub mod config;
pub mod diagnostics;
pub mod discover;
pub mod header;
pub mod lines;
pub mod manifest;
pub mod reconcile;
pub mod reporter;

pub use check::check_module;
pub use config::{load_config, CheckConfig, ConfigError};
pub use diagnostics::{Finding, FindingKind, ModuleReport, Severity};
