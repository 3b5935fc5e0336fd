//! Reconciliation of declared service components against discovered descriptors.
//!
//! One linear pass over the declarations in header order. Every discovered file is
//! attributed to at most one declaration (explicit hit, partial wildcard hit, or
//! undeclared) and every declaration to at most one category (structural failure,
//! global wildcard, partial wildcard, explicit), so the same entity is never
//! reported twice or contradictorily.
//!
//! Partial wildcards (`service*.xml`) are matched by compiling the base name without
//! the descriptor extension into an unanchored regex: `*` becomes `.*`, every other
//! character is literal. A file is covered when the pattern is found anywhere in its
//! name with the descriptor extension removed.
//!
//! Descriptors are tracked per file, so two files sharing a base name in different
//! subfolders are reported separately.

use std::collections::BTreeSet;

use regex::Regex;

use crate::config::CheckConfig;
use crate::diagnostics::{Finding, FindingKind};
use crate::discover::DiscoveredFile;
use crate::header::Declaration;

/// Compile a partial wildcard stem into an unanchored pattern.
pub fn wildcard_pattern(stem: &str) -> Result<Regex, regex::Error> {
    let parts: Vec<String> = stem.split('*').map(regex::escape).collect();
    Regex::new(&parts.join(".*"))
}

/// Insertion-ordered set of names.
#[derive(Debug, Default)]
struct OrderedNames {
    order: Vec<String>,
    members: BTreeSet<String>,
}

impl OrderedNames {
    fn insert(&mut self, name: &str) {
        if self.members.insert(name.to_string()) {
            self.order.push(name.to_string());
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

struct Run<'a> {
    config: &'a CheckConfig,
    header_line: u32,
    /// Every included descriptor name, never shrinks.
    existing: BTreeSet<String>,
    /// Names of descriptors not yet covered by any declaration, one entry per file.
    discovered: Vec<String>,
    explicit: OrderedNames,
    best_approach_logged: bool,
    findings: Vec<Finding>,
}

impl<'a> Run<'a> {
    fn new(config: &'a CheckConfig, header_line: u32, files: &[DiscoveredFile]) -> Self {
        let discovered: Vec<String> = files
            .iter()
            .filter(|f| !f.excluded)
            .map(|f| f.name.clone())
            .collect();
        Self {
            config,
            header_line,
            existing: discovered.iter().cloned().collect(),
            discovered,
            explicit: OrderedNames::default(),
            best_approach_logged: false,
            findings: Vec::new(),
        }
    }

    fn emit(&mut self, kind: FindingKind, params: Vec<String>) {
        self.findings.push(Finding {
            line: self.header_line,
            kind,
            params,
        });
    }

    fn log_best_approach(&mut self) {
        if !self.best_approach_logged {
            self.best_approach_logged = true;
            self.emit(FindingKind::BestApproach, Vec::new());
        }
    }

    /// Returns `false` once a global wildcard has covered everything.
    fn visit(&mut self, decl: &Declaration, total: usize) -> bool {
        if !decl.in_descriptors_folder(self.config) {
            self.emit(
                FindingKind::WrongDirectory,
                vec![decl.parent_directory_name.clone()],
            );
        }

        if !decl.has_xml_extension {
            self.emit(FindingKind::WrongExtension, vec![decl.base_name.clone()]);
            return true;
        }

        if decl.is_global_wildcard {
            if total > 1 {
                self.emit(FindingKind::RepeatedService, Vec::new());
            }
            tracing::debug!(token = %decl.raw, "global wildcard covers every descriptor");
            self.discovered.clear();
            self.explicit.clear();
            return false;
        }

        if decl.has_wildcard {
            self.visit_partial_wildcard(decl);
            return true;
        }

        self.explicit.insert(&decl.base_name);
        self.log_best_approach();
        true
    }

    fn visit_partial_wildcard(&mut self, decl: &Declaration) {
        let pattern = match wildcard_pattern(decl.stem(self.config)) {
            Ok(pattern) => pattern,
            Err(err) => {
                tracing::warn!(token = %decl.raw, error = %err, "wildcard did not compile");
                self.emit(FindingKind::NotMatchingRegex, vec![decl.raw.clone()]);
                return;
            }
        };

        let config = self.config;
        let mut matched = 0usize;
        self.discovered.retain(|name| {
            let stem = name
                .strip_suffix(config.descriptor_extension.as_str())
                .unwrap_or(name.as_str());
            if pattern.is_match(stem) {
                matched += 1;
                false
            } else {
                true
            }
        });
        tracing::debug!(token = %decl.raw, matched, "partial wildcard applied");

        if matched == 0 {
            self.emit(FindingKind::NotMatchingRegex, vec![decl.raw.clone()]);
        } else {
            self.log_best_approach();
        }
    }

    fn finish(mut self, header_present: bool) -> Vec<Finding> {
        let missing: Vec<String> = self
            .explicit
            .iter()
            .filter(|name| !self.existing.contains(*name))
            .map(str::to_string)
            .collect();
        for name in missing {
            self.emit(FindingKind::NotExistingService, vec![name]);
        }

        let undeclared_line = if header_present { self.header_line } else { 0 };
        let undeclared: Vec<String> = self
            .discovered
            .iter()
            .filter(|name| !self.explicit.contains(name.as_str()))
            .cloned()
            .collect();
        for name in undeclared {
            self.findings.push(Finding {
                line: undeclared_line,
                kind: FindingKind::NotIncludedService,
                params: vec![name],
            });
        }
        self.findings
    }
}

/// Reconcile header declarations against discovered descriptor files.
///
/// `header_line` is the manifest line of the declaration header, `None` when the
/// header is absent. Excluded files are ignored. The result is deterministic for the
/// same inputs.
pub fn reconcile(
    declarations: &[Declaration],
    files: &[DiscoveredFile],
    header_line: Option<u32>,
    config: &CheckConfig,
) -> Vec<Finding> {
    let mut run = Run::new(config, header_line.unwrap_or(0), files);

    for decl in declarations {
        if !run.visit(decl, declarations.len()) {
            return run.findings;
        }
    }

    run.finish(header_line.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_pattern_escapes_literals() {
        let re = wildcard_pattern("service.v1*").unwrap();
        assert!(re.is_match("service.v1Impl.xml"));
        assert!(!re.is_match("serviceXv1Impl.xml"));
    }

    #[test]
    fn wildcard_pattern_is_unanchored() {
        let re = wildcard_pattern("service*").unwrap();
        assert!(re.is_match("myserviceOne.xml"));
        assert!(!re.is_match("other.xml"));
    }

    #[test]
    fn ordered_names_keep_first_insertion() {
        let mut names = OrderedNames::default();
        names.insert("b");
        names.insert("a");
        names.insert("b");
        assert_eq!(names.iter().collect::<Vec<_>>(), vec!["b", "a"]);
        assert!(names.contains("a"));
        names.clear();
        assert!(!names.contains("b"));
        assert_eq!(names.iter().count(), 0);
    }
}
