//! Implementation of the `convert` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueHint;
use json2yaml_convert::Source;
use json2yaml_convert::convert_source;
use tracing::debug;

use crate::config::Config;

/// Arguments for the `convert` command.
#[derive(Parser, Debug, Clone, Default)]
pub struct Args {
    /// The JSON file to convert.
    ///
    /// If omitted, the document is read from standard input.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Disables color output.
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Applies the configuration to the command arguments.
    pub fn apply(mut self, config: &Config) -> Self {
        self.no_color = self.no_color || !config.common.color;
        self
    }

    /// Whether output written to a stream should be colored.
    ///
    /// Both log lines and the error prefix use this.
    pub fn use_color(&self, is_terminal: bool) -> bool {
        is_terminal && !self.no_color
    }
}

/// Runs the `convert` command, writing the YAML document to `stdout`.
///
/// Nothing is written unless the whole document converts successfully.
pub fn convert(args: Args, mut stdout: impl Write) -> Result<()> {
    let source = Source::new(args.file);
    debug!("converting JSON from {source}");

    let yaml = convert_source(&source)?;

    stdout
        .write_all(yaml.as_bytes())
        .context("failed to write to standard output")?;
    stdout.flush().context("failed to flush standard output")
}
