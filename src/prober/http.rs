use super::{Probe, ProbeError, ProbeMethod};
use crate::APP_USER_AGENT;
use reqwest::{header::CACHE_CONTROL, Client, Method, StatusCode};
use std::time::Duration;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// [`Probe`] over HTTP with `reqwest`.
///
/// Each request carries its own timeout, which aborts the in-flight request
/// when it expires.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, ProbeError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|e| ProbeError::Network(format!("Error creating reqwest client: {e}")))?;

        Ok(Self { client })
    }

    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Probe for HttpProbe {
    async fn probe(
        &self,
        url: &Url,
        method: ProbeMethod,
        timeout: Duration,
    ) -> Result<StatusCode, ProbeError> {
        let method = match method {
            ProbeMethod::Head => Method::HEAD,
            ProbeMethod::Get => Method::GET,
        };

        let span = info_span!("login.probe", http.method = %method, url = %url);

        let response = self
            .client
            .request(method, url.clone())
            .header(CACHE_CONTROL, "no-store")
            .timeout(timeout)
            .send()
            .instrument(span)
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout(url.to_string())
                } else {
                    ProbeError::Network(e.to_string())
                }
            })?;

        debug!("probe {} -> {}", url, response.status());

        Ok(response.status())
    }
}
