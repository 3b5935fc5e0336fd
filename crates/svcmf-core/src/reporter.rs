use std::io::Write;

use serde::Serialize;

use crate::config::CheckConfig;
use crate::diagnostics::{Finding, FindingKind, ModuleReport, Severity};

fn param(finding: &Finding, idx: usize) -> &str {
    finding.params.get(idx).map(String::as_str).unwrap_or("")
}

/// Human-readable text for a finding.
pub fn render_message(finding: &Finding, config: &CheckConfig) -> String {
    let folder = &config.descriptors_folder;
    let include_all = format!("{folder}/{}", config.global_wildcard_token);
    match finding.kind {
        FindingKind::WrongDirectory => format!(
            "Incorrect directory for services - {}. The services metadata files must be placed directly in {folder} directory.",
            param(finding, 0)
        ),
        FindingKind::WrongExtension => format!(
            "The service {} is with invalid extension. Only {} metadata files for services description are expected in the {folder} directory.",
            param(finding, 0),
            config.descriptor_extension
        ),
        FindingKind::NotMatchingRegex => format!(
            "The service component {} does not match any of the existing services.",
            param(finding, 0)
        ),
        FindingKind::BestApproach => format!(
            "A good approach is to use {include_all} instead of including the services metadata files separately."
        ),
        FindingKind::RepeatedService => format!(
            "If you are using {include_all}, do not include any of the services explicitly. Otherwise they will be included more than once."
        ),
        FindingKind::NotExistingService => format!(
            "The service {} does not exist in the {folder} folder.",
            param(finding, 0)
        ),
        FindingKind::NotIncludedService => format!(
            "The service {} is not included in the {} file. Are you sure that there is no need to be included?",
            param(finding, 0),
            config.manifest_file_name()
        ),
        FindingKind::UnreadableFile => {
            format!("Could not read {}: {}", param(finding, 0), param(finding, 1))
        }
    }
}

/// A finding rendered for output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub file: String,
    pub line: u32,
    pub code: &'static str,
    pub severity: Severity,
    pub kind: FindingKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,
    pub message: String,
}

impl Record {
    pub fn new(file: &str, finding: &Finding, config: &CheckConfig) -> Self {
        Self {
            file: file.to_string(),
            line: finding.line,
            code: finding.kind.code(),
            severity: finding.severity(),
            kind: finding.kind,
            params: finding.params.clone(),
            message: render_message(finding, config),
        }
    }
}

/// Receives findings one manifest at a time.
pub trait Reporter {
    fn file_started(&mut self, _file: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn finding(&mut self, file: &str, finding: &Finding) -> std::io::Result<()>;

    fn file_finished(&mut self, _file: &str) -> std::io::Result<()> {
        Ok(())
    }
}

/// Send one module's findings, in order, bracketed by start/finish events.
pub fn deliver<R: Reporter + ?Sized>(reporter: &mut R, report: &ModuleReport) -> std::io::Result<()> {
    reporter.file_started(&report.manifest)?;
    for finding in &report.findings {
        reporter.finding(&report.manifest, finding)?;
    }
    reporter.file_finished(&report.manifest)
}

#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    config: CheckConfig,
    pub records: Vec<Record>,
}

impl CollectingReporter {
    pub fn new(config: CheckConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }
}

impl Reporter for CollectingReporter {
    fn finding(&mut self, file: &str, finding: &Finding) -> std::io::Result<()> {
        self.records.push(Record::new(file, finding, &self.config));
        Ok(())
    }
}

/// Writes `file:line: severity: message [CODE]` lines.
pub struct TextReporter<W: Write> {
    config: CheckConfig,
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(config: CheckConfig, out: W) -> Self {
        Self { config, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn finding(&mut self, file: &str, finding: &Finding) -> std::io::Result<()> {
        writeln!(
            self.out,
            "{file}:{}: {}: {} [{}]",
            finding.line,
            finding.severity().as_str(),
            render_message(finding, &self.config),
            finding.kind.code()
        )
    }

    fn file_finished(&mut self, _file: &str) -> std::io::Result<()> {
        self.out.flush()
    }
}
