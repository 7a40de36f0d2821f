//! Registry ping request and failure classification

use ext_probe::{ProbeFailure, ProbeRequest};

use crate::ExtendConfig;

pub const CLIENT_ERROR_PREFIX: &str = "Client error: ";
pub const SERVER_ERROR_PREFIX: &str = "Extension server returned an error: ";
pub const TRANSPORT_ERROR_PREFIX: &str = "Testing connection to extension server failed: ";
pub const GENERIC_ERROR_PREFIX: &str =
    "Generic failure while testing connection to extension server: ";

/// The reachability request sent to the registry at setup.
pub fn ping_request(config: &ExtendConfig) -> ProbeRequest {
    ProbeRequest::get(config.ping_url())
        .with_query("platform", config.platform_version.as_str())
        .with_query("runtime", config.runtime.as_str())
        .with_query("www", config.server_software.as_str())
}

/// Turn a probe failure into the message shown to the user.
pub fn classify(failure: &ProbeFailure) -> String {
    let prefix = match failure {
        ProbeFailure::ClientError { .. } => CLIENT_ERROR_PREFIX,
        ProbeFailure::ServerError { .. } => SERVER_ERROR_PREFIX,
        ProbeFailure::TransportError { .. } => TRANSPORT_ERROR_PREFIX,
        ProbeFailure::OtherError { .. } => GENERIC_ERROR_PREFIX,
    };
    format!("{}{}", prefix, failure.message())
}
