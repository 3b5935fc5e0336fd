use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use svcmf_contracts::SVCMF_CONFIG_SCHEMA_VERSION;
use svcmf_core::{load_config, CheckConfig};

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// JSON configuration file (`schema_version` = svcmf.config@0.1.0).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Sub-path fragment below the descriptors folder to leave out.
    /// May be passed multiple times; appended to the configured list.
    #[arg(long = "excluded-subfolder", value_name = "FRAG")]
    pub excluded_subfolders: Vec<String>,
}

impl ConfigArgs {
    /// Defaults, then `--config`, then command-line exclusions.
    pub fn resolve(&self) -> Result<CheckConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("load config: {}", path.display()))?,
            None => CheckConfig::default(),
        };
        for fragment in &self.excluded_subfolders {
            if !config.excluded_subfolders.contains(fragment) {
                config.excluded_subfolders.push(fragment.clone());
            }
        }
        config.validate().context("invalid configuration")?;
        tracing::debug!(?config, "effective configuration");
        Ok(config)
    }
}

#[derive(Debug, Args)]
pub struct ConfigCmdArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct EffectiveConfig<'a> {
    schema_version: &'static str,
    #[serde(flatten)]
    config: &'a CheckConfig,
}

pub fn cmd_config(args: ConfigCmdArgs) -> Result<std::process::ExitCode> {
    let config = args.config.resolve()?;
    let doc = EffectiveConfig {
        schema_version: SVCMF_CONFIG_SCHEMA_VERSION,
        config: &config,
    };
    let json = serde_json::to_string_pretty(&doc)? + "\n";
    crate::output::emit(args.out.as_deref(), json.as_bytes())?;
    Ok(std::process::ExitCode::SUCCESS)
}
