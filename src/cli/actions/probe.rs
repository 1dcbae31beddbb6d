use crate::prober::{find_reachable_login, resolve_location, HttpProbe};
use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub page: Url,
    pub candidates: Vec<String>,
    pub probe_timeout: Duration,
}

/// Execute the probe action and print the chosen candidate.
/// # Errors
/// Returns an error if the HTTP client cannot be built.
pub async fn execute(args: Args) -> Result<()> {
    let probe = HttpProbe::new().context("failed to build probe client")?;
    let login = find_reachable_login(&probe, &args.page, &args.candidates, args.probe_timeout).await;

    println!("{login}\t{}", resolve_location(&args.page, &login));

    Ok(())
}
