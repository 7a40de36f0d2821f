//! The connectivity prober seam

use crate::ProbeFailure;

/// A single GET request against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl ProbeRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// A successful (non-4xx, non-5xx) registry answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
}

/// Issues reachability requests to the extension registry.
///
/// Timeout policy belongs to the implementation; a timed-out request is
/// reported as [`ProbeFailure::TransportError`].
pub trait ConnectivityProber {
    fn probe(&self, request: &ProbeRequest) -> Result<ProbeResponse, ProbeFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_query_keeps_insertion_order() {
        let request = ProbeRequest::get("https://market.example.com/ping")
            .with_query("platform", "1.4.0")
            .with_query("www", "unknown");

        assert_eq!(request.url, "https://market.example.com/ping");
        assert_eq!(
            request.query,
            vec![
                ("platform".to_string(), "1.4.0".to_string()),
                ("www".to_string(), "unknown".to_string()),
            ]
        );
    }
}
