//! Command-line and environment configuration.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".cli-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "catalog.sqlite";
/// Log file name stored next to the database.
const LOG_FILE_NAME: &str = "cli-catalog.log";
/// Default tracing filter.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(version, about = "Keep a catalog of your command-line tools", long_about = None)]
pub struct Args {
    /// Database file. Defaults to ~/.cli-catalog/catalog.sqlite.
    #[arg(long, env = "CLI_CATALOG_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log file. Defaults to ~/.cli-catalog/cli-catalog.log.
    #[arg(long, env = "CLI_CATALOG_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directive, e.g. `debug` or `cli_catalog=trace`.
    #[arg(long, env = "CLI_CATALOG_LOG", value_name = "FILTER", default_value = DEFAULT_LOG_FILTER)]
    pub log_level: String,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from_args(Args::try_parse_from(itr)?)
    }

    /// Fill in the defaults that live under the home directory. The home
    /// directory is only looked up when a path was not given explicitly.
    pub fn from_args(args: Args) -> Result<Self> {
        let db_path = match args.db {
            Some(path) => path,
            None => data_dir()?.join(DB_FILE_NAME),
        };
        let log_file = match args.log_file {
            Some(path) => path,
            None => data_dir()?.join(LOG_FILE_NAME),
        };
        Ok(Self {
            db_path,
            log_file,
            log_filter: args.log_level,
        })
    }
}

fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_paths_win() {
        let config = AppConfig::parse_from([
            "cli-catalog",
            "--db",
            "/tmp/c.sqlite",
            "--log-file",
            "/tmp/c.log",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/c.sqlite"));
        assert_eq!(config.log_file, PathBuf::from("/tmp/c.log"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(AppConfig::parse_from(["cli-catalog", "--bogus"]).is_err());
    }
}
