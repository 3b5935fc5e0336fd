//! Minimal JAR manifest reader.
//!
//! Only the main section is read: `Name: value` headers, where a line starting with a
//! single space continues the previous value. The main section ends at the first blank
//! line. Header names compare ASCII case-insensitively, as the JAR format specifies.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::CheckConfig;
use crate::lines::{locate_header_line, split_lines};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest {path} is not valid UTF-8")]
    Utf8 { path: PathBuf },

    #[error("invalid manifest header at line {line}: {text:?}")]
    Malformed { line: u32, text: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestAttributes {
    entries: Vec<(String, String)>,
}

impl ManifestAttributes {
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
            if raw.is_empty() {
                break;
            }
            if let Some(cont) = raw.strip_prefix(' ') {
                let Some((_, value)) = entries.last_mut() else {
                    return Err(ManifestError::Malformed {
                        line: line_no,
                        text: raw.to_string(),
                    });
                };
                value.push_str(cont);
                continue;
            }
            let Some((name, value)) = raw.split_once(':') else {
                return Err(ManifestError::Malformed {
                    line: line_no,
                    text: raw.to_string(),
                });
            };
            if name.is_empty() || name.contains(' ') {
                return Err(ManifestError::Malformed {
                    line: line_no,
                    text: raw.to_string(),
                });
            }
            let value = value.strip_prefix(' ').unwrap_or(value);
            entries.push((name.to_string(), value.to_string()));
        }
        Ok(Self { entries })
    }

    /// Value of the first header named `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The manifest as the reconciliation sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestContext {
    pub path: PathBuf,
    pub lines: Vec<String>,
    pub header_value: Option<String>,
    /// Line of the declaration header; `None` when the header is absent.
    pub header_line: Option<u32>,
}

impl ManifestContext {
    pub fn from_text(path: &Path, text: &str, config: &CheckConfig) -> Result<Self, ManifestError> {
        let attributes = ManifestAttributes::parse(text)?;
        let lines = split_lines(text);
        let header_value = attributes.get(&config.header).map(str::to_string);
        let header_line = if header_value.is_some() {
            locate_header_line(&lines, &config.header)
        } else {
            None
        };
        Ok(Self {
            path: path.to_path_buf(),
            lines,
            header_value,
            header_line,
        })
    }

    /// Context for a module whose manifest could not be read or does not exist.
    pub fn absent(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: Vec::new(),
            header_value: None,
            header_line: None,
        }
    }
}

pub fn load_manifest(path: &Path, config: &CheckConfig) -> Result<ManifestContext, ManifestError> {
    let bytes = std::fs::read(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| ManifestError::Utf8 {
        path: path.to_path_buf(),
    })?;
    ManifestContext::from_text(path, &text, config)
}
