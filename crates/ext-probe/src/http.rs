//! HTTP implementation of [`ConnectivityProber`].

use std::time::Duration;

use reqwest::blocking::Client;

use crate::prober::{ConnectivityProber, ProbeRequest, ProbeResponse};
use crate::{Error, ProbeFailure, Result};

/// Connect timeout for registry pings (10 seconds).
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Total request timeout for registry pings (30 seconds).
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Probes the registry with a blocking reqwest client.
///
/// # Example
///
/// ```ignore
/// use ext_probe::{ConnectivityProber, HttpProber, ProbeRequest};
///
/// let prober = HttpProber::new()?;
/// prober.probe(&ProbeRequest::get("https://market.example.com/ping"))?;
/// ```
#[derive(Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl std::fmt::Debug for HttpProber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProber")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpProber {
    /// Create a prober with the default ping timeouts.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a prober with a custom total timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .timeout(timeout)
            .user_agent(concat!("extend/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Map a reqwest failure that produced no response.
fn classify_error(error: &reqwest::Error) -> ProbeFailure {
    if error.is_builder() {
        // Not a request failure: the request could not even be built
        ProbeFailure::other(error.to_string())
    } else {
        ProbeFailure::transport(error.to_string())
    }
}

impl ConnectivityProber for HttpProber {
    fn probe(&self, request: &ProbeRequest) -> std::result::Result<ProbeResponse, ProbeFailure> {
        tracing::debug!(url = %request.url, "Probing extension registry");

        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .send()
            .map_err(|e| classify_error(&e))?;

        let status = response.status();
        let url = response.url().clone();
        if status.is_client_error() {
            return Err(ProbeFailure::client(format!(
                "`GET {url}` resulted in a `{status}` response"
            )));
        }
        if status.is_server_error() {
            return Err(ProbeFailure::server(format!(
                "`GET {url}` resulted in a `{status}` response"
            )));
        }

        Ok(ProbeResponse {
            status: status.as_u16(),
        })
    }
}
