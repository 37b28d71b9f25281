//! Drive the portal login once

use anyhow::{bail, Result};
use login_agent::{AttemptOutcome, LoginAgent, SkipReason};
use page_adapter::{BrowserOptions, BrowserSession, PageError};
use tracing::info;

use crate::cli::{Cli, RunArgs};
use crate::commands::open_store;

pub async fn execute(cli: &Cli, args: &RunArgs) -> Result<()> {
    let store = open_store(cli)?;
    let config = store.load().await;

    let opts = BrowserOptions {
        headless: args.headless,
        browser_path: args.browser_path.clone(),
        ..BrowserOptions::default()
    };
    let session = BrowserSession::launch(&opts)
        .await
        .map_err(|err| anyhow::anyhow!("{err}"))?;

    // The browser must come down whatever the agent did.
    let outcome = drive(&session, args, &config).await;
    session.close().await;

    match outcome? {
        AttemptOutcome::Submitted(path) => {
            info!("login submitted ({path:?})");
            println!("Login submitted.");
            Ok(())
        }
        AttemptOutcome::Skipped(SkipReason::NotLoginPage) => {
            println!("Not a login page, nothing to do.");
            Ok(())
        }
        AttemptOutcome::Skipped(SkipReason::MissingCredentials) => {
            println!("No credentials saved. Run `portal-autologin config set` first.");
            Ok(())
        }
        AttemptOutcome::MissingFields(fields) => {
            let names: Vec<&str> = fields.iter().map(|f| f.label()).collect();
            bail!("could not find: {}", names.join(", "));
        }
        AttemptOutcome::FilledNoSubmitPath => {
            bail!("credentials filled but no submit path was found");
        }
        AttemptOutcome::Errored(message) => bail!("auto-login error: {message}"),
    }
}

async fn drive(
    session: &BrowserSession,
    args: &RunArgs,
    config: &portal_store::StoredConfig,
) -> Result<AttemptOutcome> {
    session
        .goto(&args.url)
        .await
        .map_err(|err: PageError| anyhow::anyhow!("{err}"))?;
    let page = session.page();
    Ok(LoginAgent::new().run(&page, config).await)
}
