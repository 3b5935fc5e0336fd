use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use svcmf_contracts::{
    DEFAULT_SKIP_DIRS, DESCRIPTORS_FOLDER, DESCRIPTOR_EXTENSION, GLOBAL_WILDCARD_TOKEN,
    MANIFEST_RELATIVE_PATH, SERVICE_COMPONENT_HEADER, SVCMF_CONFIG_SCHEMA_VERSION,
};
use thiserror::Error;

/// Errors that make every subsequent finding meaningless. Surfaced before any
/// module is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config schema_version mismatch: expected {expected:?} got {got:?}")]
    SchemaVersion { expected: &'static str, got: String },

    #[error("invalid config field {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Recognized options of the service-component check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CheckConfig {
    /// Canonical folder holding descriptor files (e.g. `OSGI-INF`).
    pub descriptors_folder: String,
    pub descriptor_extension: String,
    /// Single header token meaning "every descriptor is included".
    pub global_wildcard_token: String,
    /// Sub-path fragments (relative to the descriptors folder) whose files never
    /// take part in reconciliation.
    pub excluded_subfolders: Vec<String>,
    /// Manifest header carrying the declarations.
    pub header: String,
    /// Manifest location relative to a module root.
    pub manifest_path: String,
    pub skip_dirs: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            descriptors_folder: DESCRIPTORS_FOLDER.to_string(),
            descriptor_extension: DESCRIPTOR_EXTENSION.to_string(),
            global_wildcard_token: GLOBAL_WILDCARD_TOKEN.to_string(),
            excluded_subfolders: Vec::new(),
            header: SERVICE_COMPONENT_HEADER.to_string(),
            manifest_path: MANIFEST_RELATIVE_PATH.to_string(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CheckConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_empty("descriptors_folder", &self.descriptors_folder)?;
        if self.descriptors_folder.contains(['/', '\\']) {
            return Err(invalid(
                "descriptors_folder",
                format!(
                    "must be a single directory name, got {:?}",
                    self.descriptors_folder
                ),
            ));
        }

        non_empty("descriptor_extension", &self.descriptor_extension)?;
        if !self.descriptor_extension.starts_with('.') || self.descriptor_extension.len() < 2 {
            return Err(invalid(
                "descriptor_extension",
                format!(
                    "must look like \".xml\", got {:?}",
                    self.descriptor_extension
                ),
            ));
        }

        non_empty("global_wildcard_token", &self.global_wildcard_token)?;
        if !self
            .global_wildcard_token
            .ends_with(&self.descriptor_extension)
        {
            return Err(invalid(
                "global_wildcard_token",
                format!(
                    "{:?} must end with the descriptor extension {:?}",
                    self.global_wildcard_token, self.descriptor_extension
                ),
            ));
        }

        non_empty("header", &self.header)?;
        if self.header.contains(':') {
            return Err(invalid("header", "must not contain ':'".to_string()));
        }
        non_empty("manifest_path", &self.manifest_path)?;

        for fragment in &self.excluded_subfolders {
            if fragment.trim().is_empty() {
                return Err(invalid(
                    "excluded_subfolders",
                    "entries must be non-empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn manifest_file_name(&self) -> &str {
        self.manifest_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.manifest_path)
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must be non-empty".to_string()));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

/// Load and validate a JSON configuration document. Omitted fields take defaults.
pub fn load_config(path: &Path) -> Result<CheckConfig, ConfigError> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let mut doc: Value = serde_json::from_slice(&bytes).map_err(parse_err)?;

    let got = doc
        .as_object_mut()
        .and_then(|obj| obj.remove("schema_version"))
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    if got != SVCMF_CONFIG_SCHEMA_VERSION {
        return Err(ConfigError::SchemaVersion {
            expected: SVCMF_CONFIG_SCHEMA_VERSION,
            got,
        });
    }

    let cfg: CheckConfig = serde_json::from_value(doc).map_err(parse_err)?;
    cfg.validate()?;
    Ok(cfg)
}
