//! Command-line surface

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "portal-autologin",
    version,
    about = "Auto-fill and submit the 24Online captive portal login"
)]
pub struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info", value_name = "LEVEL")]
    pub log_level: String,

    /// Directory holding the config record (defaults to the user
    /// config directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the portal page and drive the login once
    Run(RunArgs),
    /// Edit the persisted credentials and selector overrides
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args)]
pub struct RunArgs {
    /// Portal page address
    #[arg(long, default_value = login_agent::DEFAULT_PORTAL_URL)]
    pub url: String,

    /// Run the browser without a visible window
    #[arg(long)]
    pub headless: bool,

    /// Explicit Chrome/Chromium binary (otherwise $PATH is probed)
    #[arg(long, value_name = "PATH")]
    pub browser_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Validate and save credentials and selector overrides
    Set(SetArgs),
    /// Print the stored record
    Show {
        /// Print the password in plain text instead of masked
        #[arg(long)]
        reveal: bool,
    },
    /// Wipe the stored record
    Clear,
}

#[derive(Args)]
pub struct SetArgs {
    /// Registration number used as the portal username
    #[arg(long, value_name = "ID")]
    pub reg_number: Option<String>,

    /// Portal password (stored base64-obfuscated, not encrypted)
    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// CSS selector override for the username field
    #[arg(long, value_name = "SELECTOR")]
    pub username_selector: Option<String>,

    /// CSS selector override for the password field
    #[arg(long, value_name = "SELECTOR")]
    pub password_selector: Option<String>,

    /// CSS selector override for the submit control
    #[arg(long, value_name = "SELECTOR")]
    pub submit_selector: Option<String>,
}
