//! Subcommand implementations

pub mod config;
pub mod run;

use anyhow::{Context, Result};
use portal_store::ConfigStore;

use crate::cli::Cli;

pub fn open_store(cli: &Cli) -> Result<ConfigStore> {
    match &cli.config_dir {
        Some(dir) => ConfigStore::open_in(dir),
        None => ConfigStore::open_default(),
    }
    .context("could not open the configuration store")
}
