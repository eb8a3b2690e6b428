//! Launch options.
//!
//! Parses the command line into [`ConfigureOptions`]. Help and version
//! requests are serviced here: they print to stdout and yield no options, so
//! the caller can exit cleanly without a loaded configuration.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use thiserror::Error;

use crate::util::config::{ConfigError, ConfigureOptions};
use crate::VERSION;

#[cfg(test)]
mod tests;

/// Errors from command-line handling.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The command line could not be parsed.
    #[error("invalid command line: {0}")]
    Parse(clap::Error),
    /// Help or version output could not be written.
    #[error("cannot write help output: {0}")]
    Io(#[from] std::io::Error),
    /// The config file named on the command line could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

const CONFIG_KEYS_HELP: &str = "\
Config file keys:
  data-path      directory holding immutable game data
  settings-path  directory holding user-editable settings
  saves-path     directory holding save games";

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "stagekit")]
#[command(version = VERSION)]
#[command(about = "Runtime support layer for small game engines", long_about = None)]
#[command(after_help = CONFIG_KEYS_HELP)]
struct Args {
    /// Configuration file (TOML) naming the engine directories
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Parse the command line into configure options.
///
/// `--help` and `--version` print their text and yield `Ok(None)`. With
/// `--config FILE` the file is loaded; without it, the defaults are
/// returned.
pub fn read_options<I, T>(args: I) -> Result<Option<ConfigureOptions>, OptionsError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let parsed = match Args::try_parse_from(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    err.print()?;
                    Ok(None)
                }
                _ => Err(OptionsError::Parse(err)),
            };
        }
    };
    let options = match parsed.config {
        Some(path) => ConfigureOptions::load(&path)?,
        None => ConfigureOptions::default(),
    };
    Ok(Some(options))
}
