//! Shared, version-pinned identifiers and bundle layout defaults.
//!
//! These constants are the single source of truth for schema/version strings that
//! appear in machine-readable I/O, and for the conventional OSGi bundle layout the
//! checker assumes when no configuration overrides it.

pub const SVCMF_CONFIG_SCHEMA_VERSION: &str = "svcmf.config@0.1.0";
pub const SVCMF_MODULE_REPORT_SCHEMA_VERSION: &str = "svcmf.module.report@0.1.0";
pub const SVCMF_CHECK_REPORT_SCHEMA_VERSION: &str = "svcmf.check.report@0.1.0";
pub const SVCMF_CODES_SCHEMA_VERSION: &str = "svcmf.codes@0.1.0";

pub const SERVICE_COMPONENT_HEADER: &str = "Service-Component";
pub const DESCRIPTORS_FOLDER: &str = "OSGI-INF";
pub const DESCRIPTOR_EXTENSION: &str = ".xml";
pub const GLOBAL_WILDCARD_TOKEN: &str = "*.xml";
pub const MANIFEST_RELATIVE_PATH: &str = "META-INF/MANIFEST.MF";

/// Directory names never descended into while discovering descriptors or modules.
pub const DEFAULT_SKIP_DIRS: &[&str] = &[".git", "target"];
