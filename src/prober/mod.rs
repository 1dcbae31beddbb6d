//! Best-effort search for a login page that answers.
//!
//! Candidates are tried in order with a bounded `HEAD` (and one `GET` retry on
//! `405`). The first success wins. A failed probe cannot tell "missing page"
//! apart from "blocked" or "offline", so every failure just advances. When
//! nothing answers, the first candidate is returned anyway: the caller always
//! gets something to navigate to.

mod http;

pub use self::http::HttpProbe;

use reqwest::StatusCode;
use std::{future::Future, time::Duration};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

/// Per-probe bound on each network check.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2200);

/// Returned when the candidate list is empty.
pub const LAST_RESORT_LOGIN: &str = "login.html";

/// Login locations tried from admin pages, most likely first.
pub const DEFAULT_LOGIN_CANDIDATES: [&str; 6] = [
    "../public/login.html",
    "../auth/login.html",
    "/auth/login.html",
    "/login.html",
    "login.html",
    "../login.html",
];

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe timed out: {0}")]
    Timeout(String),
    #[error("probe failed: {0}")]
    Network(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeMethod {
    Head,
    Get,
}

/// One bounded existence check against an absolute URL.
pub trait Probe {
    fn probe(
        &self,
        url: &Url,
        method: ProbeMethod,
        timeout: Duration,
    ) -> impl Future<Output = Result<StatusCode, ProbeError>> + Send;
}

/// The default candidates as owned strings.
#[must_use]
pub fn default_candidates() -> Vec<String> {
    DEFAULT_LOGIN_CANDIDATES
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Trim candidates and drop blanks; an empty result means "use the defaults".
pub fn normalize_candidates<I, T>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let candidates: Vec<String> = candidates
        .into_iter()
        .map(|c| c.as_ref().trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if candidates.is_empty() {
        default_candidates()
    } else {
        candidates
    }
}

/// Resolve `location` against the current page, keeping it verbatim if it
/// does not form a valid URL.
#[must_use]
pub fn resolve_location(page: &Url, location: &str) -> String {
    page.join(location)
        .map_or_else(|_| location.to_string(), |url| url.to_string())
}

fn head_accepted(status: StatusCode) -> bool {
    (200..400).contains(&status.as_u16())
}

/// First candidate whose probe succeeds, or the first candidate as fallback.
///
/// The returned string is the candidate as given (relative or absolute); use
/// [`resolve_location`] to navigate to it.
#[instrument(skip(probe, page, candidates), fields(page = %page, candidates = candidates.len()))]
pub async fn find_reachable_login<P: Probe>(
    probe: &P,
    page: &Url,
    candidates: &[String],
    timeout: Duration,
) -> String {
    let Some(first) = candidates.first() else {
        return LAST_RESORT_LOGIN.to_string();
    };

    for candidate in candidates {
        let Ok(url) = page.join(candidate) else {
            debug!("skipping unparseable candidate: {candidate}");
            continue;
        };

        match probe.probe(&url, ProbeMethod::Head, timeout).await {
            Ok(status) if head_accepted(status) => {
                debug!("login candidate reachable: {url} ({status})");
                return candidate.clone();
            }
            Ok(StatusCode::METHOD_NOT_ALLOWED) => {
                match probe.probe(&url, ProbeMethod::Get, timeout).await {
                    Ok(status) if status.is_success() => {
                        debug!("login candidate reachable via GET: {url} ({status})");
                        return candidate.clone();
                    }
                    Ok(status) => debug!("login candidate rejected GET: {url} ({status})"),
                    Err(e) => debug!("login candidate GET failed: {url}: {e}"),
                }
            }
            Ok(status) => debug!("login candidate unavailable: {url} ({status})"),
            Err(e) => debug!("login candidate unusable: {url}: {e}"),
        }
    }

    debug!("no login candidate answered, falling back to {first}");

    first.clone()
}
