//! Client-side logout.
//!
//! Logout never fails: the server call is best effort, storage removals ignore
//! errors, and the login destination always resolves to something.

use crate::{
    prober::{
        default_candidates, find_reachable_login, resolve_location, Probe, ProbeError,
        DEFAULT_PROBE_TIMEOUT,
    },
    storage::Storage,
    APP_USER_AGENT,
};
use reqwest::{header::CACHE_CONTROL, Client};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Keys that may hold session data. HttpOnly cookies are out of reach.
pub const SESSION_KEYS: [&str; 7] = [
    "token",
    "authToken",
    "user",
    "session",
    "currentUser",
    "jwt",
    "access_token",
];

/// Remove every session key from both stores, ignoring failures.
pub fn clear_session<L: Storage, S: Storage>(local: &L, session: &S) {
    for key in SESSION_KEYS {
        if let Err(e) = local.remove_item(key) {
            debug!("could not remove {key} from local storage: {e}");
        }
        if let Err(e) = session.remove_item(key) {
            debug!("could not remove {key} from session storage: {e}");
        }
    }
}

/// Trimmed endpoint, `None` when blank.
#[must_use]
pub fn normalize_endpoint(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone)]
pub struct LogoutConfig {
    /// Server endpoint notified with a `POST` before clearing the client.
    pub endpoint: Option<String>,
    pub candidates: Vec<String>,
    pub probe_timeout: Duration,
}

impl Default for LogoutConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            candidates: default_candidates(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

pub struct Logout<P> {
    client: Client,
    probe: P,
    config: LogoutConfig,
}

impl<P: Probe> Logout<P> {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(probe: P, config: LogoutConfig) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|e| ProbeError::Network(format!("Error creating reqwest client: {e}")))?;
        Ok(Self::with_client(client, probe, config))
    }

    pub fn with_client(client: Client, probe: P, config: LogoutConfig) -> Self {
        Self {
            client,
            probe,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &LogoutConfig {
        &self.config
    }

    async fn notify_server(&self, endpoint: &str, page: &Url) {
        let url = resolve_location(page, endpoint);
        match self
            .client
            .post(&url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                debug!("server logout accepted: {}", response.status());
            }
            Ok(response) => {
                warn!("Server logout call failed (continuing client-side): {}", response.status());
            }
            Err(e) => warn!("Server logout call failed (continuing client-side): {e}"),
        }
    }

    /// Log out from `page` and return the absolute login URL to navigate to.
    #[instrument(skip_all, fields(page = %page))]
    pub async fn perform<L: Storage, S: Storage>(&self, page: &Url, local: &L, session: &S) -> String {
        if let Some(endpoint) = &self.config.endpoint {
            self.notify_server(endpoint, page).await;
        }

        clear_session(local, session);

        let login = find_reachable_login(
            &self.probe,
            page,
            &self.config.candidates,
            self.config.probe_timeout,
        )
        .await;
        let destination = resolve_location(page, &login);

        info!("logged out, redirecting to {destination}");

        destination
    }
}
