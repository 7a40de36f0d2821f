//! Registry connectivity probing for Extension Manager.
//!
//! A [`ConnectivityProber`] issues a single reachability request and reports
//! failures as a closed set of [`ProbeFailure`] kinds, so callers can match on
//! them exhaustively instead of inspecting transport-specific error types.

pub mod error;
pub mod http;
pub mod prober;

pub use error::{Error, ProbeFailure, Result};
pub use http::HttpProber;
pub use prober::{ConnectivityProber, ProbeRequest, ProbeResponse};
