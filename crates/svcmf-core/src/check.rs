use std::path::Path;

use crate::config::CheckConfig;
use crate::diagnostics::{Finding, FindingKind, ModuleReport};
use crate::discover::discover_descriptors;
use crate::header::tokenize_header;
use crate::manifest::{load_manifest, ManifestContext, ManifestError};
use crate::reconcile::reconcile;

/// Check one bundle: its manifest header against the descriptors below `root`.
///
/// Never fails for data reasons. Unreadable input is reported as a single
/// `UNREADABLE_FILE` finding per source and the check continues with what could be
/// read.
pub fn check_module(root: &Path, config: &CheckConfig) -> ModuleReport {
    let manifest_path = root.join(&config.manifest_path);
    let mut io_findings: Vec<Finding> = Vec::new();

    let manifest = if manifest_path.is_file() {
        match load_manifest(&manifest_path, config) {
            Ok(ctx) => ctx,
            Err(err) => {
                tracing::warn!(manifest = %manifest_path.display(), error = %err, "manifest unreadable");
                io_findings.push(unreadable(&manifest_path, &err));
                ManifestContext::absent(&manifest_path)
            }
        }
    } else {
        tracing::debug!(manifest = %manifest_path.display(), "no manifest; treating header as absent");
        ManifestContext::absent(&manifest_path)
    };

    let declarations = tokenize_header(manifest.header_value.as_deref(), config);

    let discovery = if root.is_dir() {
        discover_descriptors(root, config)
    } else {
        Default::default()
    };
    if let Some((path, err)) = discovery.errors.first() {
        io_findings.push(Finding {
            line: 0,
            kind: FindingKind::UnreadableFile,
            params: vec![path.clone(), err.clone()],
        });
    }

    let mut findings = io_findings;
    findings.extend(reconcile(
        &declarations,
        &discovery.files,
        manifest.header_line,
        config,
    ));

    ModuleReport::new(
        root.display().to_string(),
        manifest_path.display().to_string(),
    )
    .with_findings(findings)
}

fn unreadable(path: &Path, err: &ManifestError) -> Finding {
    Finding {
        line: 0,
        kind: FindingKind::UnreadableFile,
        params: vec![path.display().to_string(), err.to_string()],
    }
}
