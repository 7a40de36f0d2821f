//! [`StubProber`]: a scripted [`ConnectivityProber`].

use std::cell::RefCell;
use std::rc::Rc;

use ext_probe::{ConnectivityProber, ProbeFailure, ProbeRequest, ProbeResponse};

/// A prober with a fixed outcome that records every request it receives.
#[derive(Debug, Clone)]
pub struct StubProber {
    outcome: Result<ProbeResponse, ProbeFailure>,
    requests: Rc<RefCell<Vec<ProbeRequest>>>,
}

impl StubProber {
    /// Answers every probe with `200`.
    pub fn ok() -> Self {
        Self::answering(Ok(ProbeResponse { status: 200 }))
    }

    /// Fails every probe with `failure`.
    pub fn failing(failure: ProbeFailure) -> Self {
        Self::answering(Err(failure))
    }

    fn answering(outcome: Result<ProbeResponse, ProbeFailure>) -> Self {
        Self {
            outcome,
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<ProbeRequest> {
        self.requests.borrow().clone()
    }

    pub fn probe_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl ConnectivityProber for StubProber {
    fn probe(&self, request: &ProbeRequest) -> Result<ProbeResponse, ProbeFailure> {
        self.requests.borrow_mut().push(request.clone());
        self.outcome.clone()
    }
}
