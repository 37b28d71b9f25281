//! Settings editor: load, save, clear, show
//!
//! The save path mirrors the edit form contract: existing values are
//! the starting point, required fields are validated before anything
//! is written, and the password is re-encoded on every save. Passing
//! an empty selector string removes that override.

use anyhow::{bail, Context, Result};
use portal_store::{codec, ConfigStore, StoredConfig};
use tracing::info;

use crate::cli::{Cli, ConfigCommand, SetArgs};
use crate::commands::open_store;

pub async fn execute(cli: &Cli, command: &ConfigCommand) -> Result<()> {
    let store = open_store(cli)?;
    match command {
        ConfigCommand::Set(args) => set(&store, args).await,
        ConfigCommand::Show { reveal } => show(&store, *reveal).await,
        ConfigCommand::Clear => clear(&store).await,
    }
}

async fn set(store: &ConfigStore, args: &SetArgs) -> Result<()> {
    let mut record = store.load().await;

    if let Some(reg_number) = &args.reg_number {
        record.reg_number = reg_number.trim().to_string();
    }
    if record.reg_number.is_empty() {
        bail!("please provide your registration number (--reg-number)");
    }

    match &args.password {
        Some(password) if password.is_empty() => {
            bail!("please provide a non-empty password (--password)");
        }
        Some(password) => record.password = codec::encode(password),
        None => {
            if codec::decode(&record.password).is_empty() {
                bail!("please provide a non-empty password (--password)");
            }
        }
    }

    record.username_selector = merge_selector(&args.username_selector, &record.username_selector);
    record.password_selector = merge_selector(&args.password_selector, &record.password_selector);
    record.submit_selector = merge_selector(&args.submit_selector, &record.submit_selector);

    store
        .save(&record)
        .await
        .context("error saving configuration")?;
    info!("config record written to {}", store.path().display());
    println!("Credentials saved.");
    Ok(())
}

fn merge_selector(flag: &Option<String>, current: &Option<String>) -> Option<String> {
    match flag {
        Some(value) => {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
        None => current.clone(),
    }
}

async fn show(store: &ConfigStore, reveal: bool) -> Result<()> {
    let record = store.load().await;
    if record == StoredConfig::default() {
        println!("No configuration saved.");
        return Ok(());
    }

    let password = if reveal {
        codec::decode(&record.password)
    } else {
        "********".to_string()
    };
    println!("registration number: {}", record.reg_number);
    println!("password:            {password}");
    println!(
        "username selector:   {}",
        record.username_selector.as_deref().unwrap_or("(built-in)")
    );
    println!(
        "password selector:   {}",
        record.password_selector.as_deref().unwrap_or("(built-in)")
    );
    println!(
        "submit selector:     {}",
        record.submit_selector.as_deref().unwrap_or("(built-in)")
    );
    Ok(())
}

async fn clear(store: &ConfigStore) -> Result<()> {
    store.clear().await.context("error clearing configuration")?;
    println!("All data cleared.");
    Ok(())
}
