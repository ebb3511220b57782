//! Health check endpoint
//!
//! Liveness only: once the process is serving, the answer is always `healthy`.

use super::Handler;
use crate::clock::{format_uptime, Clock, UptimeTracker};
use crate::http::{self, HttpResponse};
use crate::logger::Logger;
use chrono::{DateTime, Utc};
use hyper::{Request, Response};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub uptime: String,
}

pub struct HealthCheck {
    uptime: UptimeTracker,
    clock: Arc<dyn Clock>,
    logger: Logger,
}

impl HealthCheck {
    pub fn new(uptime: UptimeTracker, clock: Arc<dyn Clock>, logger: Logger) -> Self {
        Self {
            uptime,
            clock,
            logger,
        }
    }

    pub fn snapshot(&self) -> HealthResponse {
        HealthResponse {
            status: "healthy",
            timestamp: self.clock.now(),
            uptime: format_uptime(self.uptime.uptime(self.clock.as_ref())),
        }
    }
}

impl Handler for HealthCheck {
    async fn call(&self, _req: Request<()>) -> HttpResponse {
        match http::build_json_response(Response::builder(), &self.snapshot()) {
            Ok(resp) => resp,
            Err(e) => {
                self.logger.warn(&format!("Error encoding health response: {e}"));
                http::build_500_response(Response::builder())
            }
        }
    }
}
