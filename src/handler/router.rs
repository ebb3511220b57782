//! Request routing dispatch module
//!
//! Fixed route table: exact path match, everything unknown falls through to the
//! index page handler, which answers 404 for anything but `/`.

use super::{Handler, HealthCheck, LatencyProbe, StaticPage};
use crate::http::HttpResponse;
use hyper::Request;

pub const PROBE_PATH: &str = "/ping-latency";
pub const HEALTH_PATHS: [&str; 2] = ["/health", "/healthz"];

/// Where a path is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Index,
    Probe,
    Health,
}

impl Route {
    /// Paths are compared as received. There is no percent-decoding and no
    /// slash or dot-segment cleanup, so `/ping%2Dlatency` or `//health` is an
    /// unknown path and lands on the index handler's 404.
    pub fn resolve(path: &str) -> Self {
        if path == PROBE_PATH {
            Self::Probe
        } else if HEALTH_PATHS.contains(&path) {
            Self::Health
        } else {
            Self::Index
        }
    }

    /// Probe and health endpoints are polled constantly and kept out of the access log
    pub const fn is_high_frequency(self) -> bool {
        matches!(self, Self::Probe | Self::Health)
    }
}

/// Route table owning one instance of each endpoint
pub struct Router {
    index: StaticPage,
    probe: LatencyProbe,
    health: HealthCheck,
}

impl Router {
    pub const fn new(index: StaticPage, probe: LatencyProbe, health: HealthCheck) -> Self {
        Self {
            index,
            probe,
            health,
        }
    }
}

impl Handler for Router {
    async fn call(&self, req: Request<()>) -> HttpResponse {
        match Route::resolve(req.uri().path()) {
            Route::Probe => self.probe.call(req).await,
            Route::Health => self.health.call(req).await,
            Route::Index => self.index.call(req).await,
        }
    }
}
