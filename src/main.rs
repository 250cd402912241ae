//! The json2yaml command line tool.

use std::io::IsTerminal;
use std::io::stderr;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::ValueHint;
use clap_verbosity_flag::Verbosity;
use colored::Colorize;
use json2yaml::commands;
use json2yaml::config::Config;
use tracing_log::AsTrace;

/// Usage examples appended to the long help.
const EXAMPLES: &str = "\
Examples:
  json2yaml input.json
  cat input.json | json2yaml";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Convert JSON to YAML",
    long_about = "Convert JSON files or standard input to YAML format.",
    after_long_help = EXAMPLES
)]
struct Cli {
    #[command(flatten)]
    args: commands::convert::Args,

    /// Path to an additional configuration file.
    #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Skip searching for and loading configuration files.
    ///
    /// Only a configuration file specified with `--config` will be loaded.
    #[arg(long)]
    skip_config_search: bool,

    #[command(flatten)]
    verbose: Verbosity,
}

fn inner() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::new(cli.config.as_deref(), cli.skip_config_search)
        .context("failed to load configuration")?;
    let args = cli.args.apply(&config);
    if !args.use_color(stderr().is_terminal()) {
        colored::control::set_override(false);
    }

    tracing_log::LogTracer::init()?;

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(cli.verbose.log_level_filter().as_trace())
        .with_writer(std::io::stderr)
        .with_ansi(args.use_color(stderr().is_terminal()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    commands::convert::convert(args, stdout().lock())
}

fn main() {
    if let Err(e) = inner() {
        eprintln!(
            "{error}: {e:#}",
            error = if stderr().is_terminal() {
                "error".red().bold()
            } else {
                "error".normal()
            }
        );
        std::process::exit(1);
    }
}
