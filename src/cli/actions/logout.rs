use crate::{
    cli::{globals::GlobalArgs, terminal::Terminal},
    flow::Navigator,
    prober::HttpProbe,
    session::{Logout, LogoutConfig},
    storage::FileStorage,
};
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub page: Url,
    pub endpoint: Option<String>,
    pub candidates: Vec<String>,
    pub probe_timeout: Duration,
}

/// Execute the logout action: clear both stores and print the login page.
/// # Errors
/// Returns an error if the HTTP client cannot be built.
pub async fn execute(args: Args) -> Result<()> {
    let probe = HttpProbe::new().context("failed to build probe client")?;
    let client = probe.client().clone();
    let logout = Logout::with_client(
        client,
        probe,
        LogoutConfig {
            endpoint: args.endpoint,
            candidates: args.candidates,
            probe_timeout: args.probe_timeout,
        },
    );

    let local = FileStorage::new(&args.globals.store);
    let session = FileStorage::new(&args.globals.session_store);

    let destination = logout.perform(&args.page, &local, &session).await;
    Terminal.navigate(&destination);

    Ok(())
}
