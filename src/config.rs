//! Implementation of the configuration module.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::trace;

/// The name of the configuration file searched for in the working directory
/// and the user's configuration directory.
pub const CONFIG_FILENAME: &str = "json2yaml.toml";

/// The prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "JSON2YAML";

/// Represents the configuration for the json2yaml CLI tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct Config {
    /// Common configuration options.
    pub common: CommonConfig,
}

/// Represents shared configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct CommonConfig {
    /// Display color output.
    pub color: bool,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    /// Loads the configuration.
    ///
    /// Sources are layered in increasing order of precedence:
    ///
    /// 1. The built-in defaults.
    /// 2. `json2yaml/json2yaml.toml` in the user's configuration directory.
    /// 3. `json2yaml.toml` in the current working directory.
    /// 4. The file at `path`, if one was given.
    /// 5. Environment variables prefixed with `JSON2YAML_`.
    ///
    /// The searched locations (2 and 3) are skipped when `skip_search` is
    /// set. A searched file that does not exist is ignored, but the explicit
    /// `path` must exist.
    pub fn new(path: Option<&Path>, skip_search: bool) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?);

        if !skip_search {
            for candidate in search_paths() {
                debug!("searching for configuration at `{}`", candidate.display());
                builder = builder.add_source(File::from(candidate).required(false));
            }
        }

        if let Some(path) = path {
            if !path.is_file() {
                bail!("configuration file `{}` does not exist", path.display());
            }

            debug!("loading configuration from `{}`", path.display());
            builder = builder.add_source(File::from(path));
        }

        let config: Config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("_"))
            .build()
            .context("failed to read configuration sources")?
            .try_deserialize()
            .context("failed to deserialize configuration")?;

        trace!("resolved configuration: {config:?}");
        Ok(config)
    }
}

/// Gets the locations searched for a configuration file, in increasing order
/// of precedence.
fn search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("json2yaml").join(CONFIG_FILENAME));
    }

    paths.push(PathBuf::from(CONFIG_FILENAME));
    paths
}
