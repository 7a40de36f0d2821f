//! Registry transport decision

use std::cell::Cell;

use url::Url;

/// Whether the registry is reached over a secure transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportDecision {
    #[default]
    Unset,
    Computed(bool),
}

impl TransportDecision {
    /// The cached decision, computing it from `site` on first use.
    pub fn resolve(cell: &Cell<TransportDecision>, site: &str) -> bool {
        match cell.get() {
            TransportDecision::Computed(secure) => secure,
            TransportDecision::Unset => {
                let secure = is_secure(site);
                tracing::debug!(site, secure, "Computed registry transport");
                cell.set(TransportDecision::Computed(secure));
                secure
            }
        }
    }
}

/// True iff `site` parses as a URL with the `https` scheme.
pub fn is_secure(site: &str) -> bool {
    Url::parse(site)
        .map(|url| url.scheme() == "https")
        .unwrap_or(false)
}
