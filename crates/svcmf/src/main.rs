use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod check;
mod codes;
mod output;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "svcmf")]
#[command(about = "Check OSGi Service-Component manifest headers against component descriptors.", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Check one or more bundles.
    Check(check::CheckArgs),
    /// Print the finding catalog (kind, code, severity).
    Codes(codes::CodesArgs),
    /// Print the effective configuration.
    Config(settings::ConfigCmdArgs),
}

fn main() -> std::process::ExitCode {
    init_tracing();

    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<std::process::ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => check::cmd_check(args),
        Command::Codes(args) => codes::cmd_codes(args),
        Command::Config(args) => settings::cmd_config(args),
    }
}

/// `SVCMF_LOG` overrides the default `warn` filter. Logs go to stderr only.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SVCMF_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
