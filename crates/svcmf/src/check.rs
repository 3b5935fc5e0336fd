use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use svcmf_contracts::SVCMF_CHECK_REPORT_SCHEMA_VERSION;
use svcmf_core::reporter::{deliver, CollectingReporter, Record, TextReporter};
use svcmf_core::{check_module, CheckConfig, ModuleReport, Severity};
use walkdir::{DirEntry, WalkDir};

use crate::settings::ConfigArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Bundle root (the directory holding META-INF and OSGI-INF).
    /// May be passed multiple times.
    #[arg(long, value_name = "DIR")]
    pub module: Vec<PathBuf>,

    /// Check every bundle found below this directory.
    /// May be passed multiple times.
    #[arg(long, value_name = "DIR")]
    pub workspace: Vec<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub jobs: u16,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    schema_version: &'static str,
    command: &'static str,
    ok: bool,
    modules_count: usize,
    findings_count: usize,
    findings: Vec<Record>,
    exit_code: u8,
}

pub fn cmd_check(args: CheckArgs) -> Result<std::process::ExitCode> {
    let config = args.config.resolve()?;
    let modules = collect_modules(&args, &config)?;
    tracing::info!(modules = modules.len(), jobs = args.jobs, "checking modules");

    let reports = check_modules(&modules, &config, usize::from(args.jobs));
    let exit_code: u8 = if reports.iter().all(|r| r.ok) { 0 } else { 1 };

    let mut collected = CollectingReporter::new(config.clone());
    for report in &reports {
        deliver(&mut collected, report).context("collect findings")?;
    }
    let records = collected.records;
    let errors = records
        .iter()
        .filter(|r| r.severity == Severity::Error)
        .count();

    match args.format {
        OutputFormat::Json => {
            let report = CheckReport {
                schema_version: SVCMF_CHECK_REPORT_SCHEMA_VERSION,
                command: "check",
                ok: exit_code == 0,
                modules_count: reports.len(),
                findings_count: records.len(),
                findings: records,
                exit_code,
            };
            let json = serde_json::to_string(&report)? + "\n";
            crate::output::emit(args.out.as_deref(), json.as_bytes())?;
        }
        OutputFormat::Text => {
            let findings = records.len();
            let mut text = TextReporter::new(config, Vec::new());
            for report in &reports {
                deliver(&mut text, report).context("render findings")?;
            }
            crate::output::emit(args.out.as_deref(), &text.into_inner())?;
            eprintln!(
                "svcmf: modules={} findings={} errors={} (exit={})",
                reports.len(),
                findings,
                errors,
                exit_code
            );
        }
    }

    Ok(std::process::ExitCode::from(exit_code))
}

/// Explicit modules plus every bundle found below each workspace, sorted and
/// de-duplicated. With neither given, the current directory is the module.
fn collect_modules(args: &CheckArgs, config: &CheckConfig) -> Result<Vec<PathBuf>> {
    let mut out: BTreeSet<PathBuf> = BTreeSet::new();

    for module in &args.module {
        if !module.is_dir() {
            bail!("module root is not a directory: {}", module.display());
        }
        out.insert(module.clone());
    }

    for workspace in &args.workspace {
        if !workspace.is_dir() {
            bail!("workspace is not a directory: {}", workspace.display());
        }
        let before = out.len();
        discover_modules(workspace, config, &mut out);
        tracing::debug!(
            workspace = %workspace.display(),
            found = out.len() - before,
            "workspace scanned"
        );
    }

    if args.module.is_empty() && args.workspace.is_empty() {
        out.insert(PathBuf::from("."));
    }

    Ok(out.into_iter().collect())
}

fn should_walk(entry: &DirEntry, config: &CheckConfig) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }
    let name = entry.file_name();
    !config.skip_dirs.iter().any(|d| name == d.as_str())
}

fn discover_modules(workspace: &Path, config: &CheckConfig, out: &mut BTreeSet<PathBuf>) {
    let walker = WalkDir::new(workspace)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| should_walk(e, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(workspace = %workspace.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_dir() && entry.path().join(&config.manifest_path).is_file() {
            out.insert(entry.into_path());
        }
    }
}

/// Runs `check_module` on up to `jobs` scoped threads. The result keeps the
/// order of `modules` whatever the scheduling.
fn check_modules(modules: &[PathBuf], config: &CheckConfig, jobs: usize) -> Vec<ModuleReport> {
    if jobs <= 1 || modules.len() <= 1 {
        return modules.iter().map(|m| check_module(m, config)).collect();
    }

    let next = AtomicUsize::new(0);
    let results: Mutex<Vec<(usize, ModuleReport)>> = Mutex::new(Vec::with_capacity(modules.len()));

    std::thread::scope(|scope| {
        let jobs = jobs.min(modules.len());
        for _ in 0..jobs {
            scope.spawn(|| loop {
                let idx = next.fetch_add(1, Ordering::Relaxed);
                if idx >= modules.len() {
                    return;
                }
                record_report(&results, idx, check_module(&modules[idx], config));
            });
        }
    });

    let mut out = results.into_inner().unwrap_or_else(|e| e.into_inner());
    out.sort_by_key(|(idx, _)| *idx);
    out.into_iter().map(|(_, report)| report).collect()
}

/// A poisoned lock still accepts the report; no module may drop out of the output.
fn record_report(results: &Mutex<Vec<(usize, ModuleReport)>>, idx: usize, report: ModuleReport) {
    results
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push((idx, report));
}
