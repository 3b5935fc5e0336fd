use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use svcmf_contracts::SVCMF_CODES_SCHEMA_VERSION;
use svcmf_core::{FindingKind, Severity};

#[derive(Debug, Args)]
pub struct CodesArgs {
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CodesDoc {
    schema_version: &'static str,
    codes: Vec<CodeEntry>,
}

#[derive(Debug, Serialize)]
struct CodeEntry {
    kind: FindingKind,
    code: &'static str,
    severity: Severity,
}

pub fn cmd_codes(args: CodesArgs) -> Result<std::process::ExitCode> {
    let doc = CodesDoc {
        schema_version: SVCMF_CODES_SCHEMA_VERSION,
        codes: FindingKind::ALL
            .iter()
            .map(|kind| CodeEntry {
                kind: *kind,
                code: kind.code(),
                severity: kind.severity(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&doc)? + "\n";
    crate::output::emit(args.out.as_deref(), json.as_bytes())?;
    Ok(std::process::ExitCode::SUCCESS)
}
