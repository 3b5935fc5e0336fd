use serde::{Deserialize, Serialize};
use svcmf_contracts::SVCMF_MODULE_REPORT_SCHEMA_VERSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    /// params: `[parent_directory]`
    WrongDirectory,
    /// params: `[base_name]`
    WrongExtension,
    /// params: `[raw_token]`
    NotMatchingRegex,
    BestApproach,
    RepeatedService,
    /// params: `[base_name]`
    NotExistingService,
    /// params: `[file_name]`
    NotIncludedService,
    /// params: `[path, error]`
    UnreadableFile,
}

impl FindingKind {
    pub const ALL: [FindingKind; 8] = [
        FindingKind::WrongDirectory,
        FindingKind::WrongExtension,
        FindingKind::NotMatchingRegex,
        FindingKind::BestApproach,
        FindingKind::RepeatedService,
        FindingKind::NotExistingService,
        FindingKind::NotIncludedService,
        FindingKind::UnreadableFile,
    ];

    pub fn code(self) -> &'static str {
        match self {
            FindingKind::WrongDirectory => "SVCMF-HDR-DIR-0001",
            FindingKind::WrongExtension => "SVCMF-HDR-EXT-0001",
            FindingKind::NotMatchingRegex => "SVCMF-HDR-GLOB-0001",
            FindingKind::BestApproach => "SVCMF-HDR-ADVICE-0001",
            FindingKind::RepeatedService => "SVCMF-HDR-REPEAT-0001",
            FindingKind::NotExistingService => "SVCMF-SVC-MISSING-0001",
            FindingKind::NotIncludedService => "SVCMF-SVC-UNDECLARED-0001",
            FindingKind::UnreadableFile => "SVCMF-IO-READ-0001",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            FindingKind::WrongDirectory
            | FindingKind::WrongExtension
            | FindingKind::NotMatchingRegex
            | FindingKind::NotExistingService => Severity::Error,
            FindingKind::RepeatedService
            | FindingKind::NotIncludedService
            | FindingKind::UnreadableFile => Severity::Warning,
            FindingKind::BestApproach => Severity::Info,
        }
    }
}

/// One diagnostic record. `line` is 1-based; 0 means "no line in the manifest".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub line: u32,
    pub kind: FindingKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
}

impl Finding {
    pub fn new(line: u32, kind: FindingKind) -> Self {
        Self {
            line,
            kind,
            params: Vec::new(),
        }
    }

    pub fn with_param(line: u32, kind: FindingKind, param: impl Into<String>) -> Self {
        Self {
            line,
            kind,
            params: vec![param.into()],
        }
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleReport {
    pub schema_version: String,
    pub module: String,
    pub manifest: String,
    pub ok: bool,
    pub findings: Vec<Finding>,
}

impl ModuleReport {
    pub fn new(module: impl Into<String>, manifest: impl Into<String>) -> Self {
        Self {
            schema_version: SVCMF_MODULE_REPORT_SCHEMA_VERSION.to_string(),
            module: module.into(),
            manifest: manifest.into(),
            ok: true,
            findings: Vec::new(),
        }
    }

    /// Findings keep their emission order; only `ok` is derived.
    pub fn with_findings(mut self, findings: Vec<Finding>) -> Self {
        self.ok = findings.iter().all(|f| f.severity() != Severity::Error);
        self.findings = findings;
        self
    }
}
