//! Latency probe endpoint
//!
//! Clients time the round trip and compare against the server timestamp in the body.
//! Callable from any browser origin.

use super::Handler;
use crate::clock::Clock;
use crate::http::{self, HttpResponse};
use crate::logger::Logger;
use chrono::{DateTime, Utc};
use hyper::{Method, Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

const ALLOWED_METHODS: &str = "GET, OPTIONS";

/// Body of a successful probe
#[derive(Debug, Serialize)]
pub struct LatencyResponse<'a> {
    pub timestamp: DateTime<Utc>,
    pub unix_milli: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_location: Option<&'a str>,
}

impl<'a> LatencyResponse<'a> {
    /// Both time fields describe the same instant
    pub fn at(timestamp: DateTime<Utc>, server_location: Option<&'a str>) -> Self {
        Self {
            timestamp,
            unix_milli: timestamp.timestamp_millis(),
            server_location: server_location.filter(|s| !s.is_empty()),
        }
    }
}

pub struct LatencyProbe {
    clock: Arc<dyn Clock>,
    server_location: Option<String>,
    logger: Logger,
}

impl LatencyProbe {
    pub fn new(clock: Arc<dyn Clock>, server_location: Option<String>, logger: Logger) -> Self {
        Self {
            clock,
            server_location,
            logger,
        }
    }

    fn respond(&self, method: &Method) -> HttpResponse {
        let builder = http::cors(Response::builder(), ALLOWED_METHODS);

        match *method {
            Method::OPTIONS => http::build_empty_response(builder, StatusCode::OK),
            Method::GET => {
                let body = LatencyResponse::at(self.clock.now(), self.server_location.as_deref());
                let builder = builder.header("Cache-Control", http::NO_CACHE);
                match http::build_json_response(builder, &body) {
                    Ok(resp) => resp,
                    Err(e) => {
                        self.logger.warn(&format!("Error encoding response: {e}"));
                        http::build_500_response(http::cors(Response::builder(), ALLOWED_METHODS))
                    }
                }
            }
            _ => http::build_405_response(builder, ALLOWED_METHODS),
        }
    }
}

impl Handler for LatencyProbe {
    async fn call(&self, req: Request<()>) -> HttpResponse {
        self.respond(req.method())
    }
}
