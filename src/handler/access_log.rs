//! Access logging wrapper
//!
//! Times the inner handler and writes one access-log line per request, except for
//! the probe and health endpoints.

use super::router::Route;
use super::{Handler, PeerAddr};
use crate::http::HttpResponse;
use crate::logger::{AccessLogEntry, Logger};
use hyper::body::Body as _;
use hyper::Request;
use std::time::Instant;

pub struct AccessLog<H> {
    inner: H,
    logger: Logger,
}

impl<H: Handler> AccessLog<H> {
    pub const fn new(inner: H, logger: Logger) -> Self {
        Self { inner, logger }
    }
}

impl<H: Handler> Handler for AccessLog<H> {
    async fn call(&self, req: Request<()>) -> HttpResponse {
        let start = Instant::now();

        let path = req.uri().path();
        if !self.logger.access_log_enabled() || Route::resolve(path).is_high_frequency() {
            return self.inner.call(req).await;
        }

        let mut entry = AccessLogEntry::new(req.method().to_string(), path.to_string());
        entry.version = format!("{:?}", req.version());
        entry.remote_addr = req.extensions().get::<PeerAddr>().map(|p| p.0);

        let resp = self.inner.call(req).await;

        entry.duration = start.elapsed();
        entry.status = resp.status().as_u16();
        entry.body_bytes = resp.body().size_hint().exact();
        self.logger.access(&entry);

        resp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessLogFormat;
    use crate::handler::test_support::request;
    use crate::http;
    use hyper::{Method, StatusCode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and answers 404
    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl Handler for Counting {
        async fn call(&self, _req: Request<()>) -> HttpResponse {
            self.calls.fetch_add(1, Ordering::SeqCst);
            http::build_404_response()
        }
    }

    #[tokio::test]
    async fn test_logs_method_path_and_duration() {
        let (logger, lines) = Logger::capture();
        let app = AccessLog::new(Counting::default(), logger);

        let resp = app.call(request(Method::GET, "/nonexistent")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with(&format!("GET    {:<20} ", "/nonexistent")));
    }

    #[tokio::test]
    async fn test_probe_and_health_are_not_logged() {
        let (logger, lines) = Logger::capture();
        let app = AccessLog::new(Counting::default(), logger);

        for path in ["/ping-latency", "/health", "/healthz"] {
            app.call(request(Method::GET, path)).await;
            app.call(request(Method::OPTIONS, path)).await;
        }

        assert_eq!(app.inner.calls.load(Ordering::SeqCst), 6);
        assert!(lines.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_response_passes_through_untouched() {
        let (logger, _lines) = Logger::capture();
        let app = AccessLog::new(Counting::default(), logger);

        let resp = app.call(request(Method::POST, "/")).await;
        let direct = http::build_404_response();
        assert_eq!(resp.status(), direct.status());
        assert_eq!(resp.headers(), direct.headers());
    }

    #[tokio::test]
    async fn test_common_format_includes_peer_and_status() {
        let (logger, lines) = Logger::capture();
        let app = AccessLog::new(
            Counting::default(),
            logger.with_access_format(AccessLogFormat::Common),
        );

        let mut req = request(Method::GET, "/missing");
        req.extensions_mut()
            .insert(PeerAddr("10.0.0.7:40000".parse().unwrap()));
        app.call(req).await;

        let lines = lines.lock().unwrap();
        assert!(lines[0].starts_with("10.0.0.7 - - ["));
        assert!(lines[0].ends_with("\"GET /missing HTTP/1.1\" 404 19"));
    }

    #[tokio::test]
    async fn test_disabled_access_log_still_calls_inner() {
        let (logger, lines) = Logger::capture();
        let app = AccessLog::new(Counting::default(), logger.with_access_log(false));

        app.call(request(Method::GET, "/")).await;
        assert_eq!(app.inner.calls.load(Ordering::SeqCst), 1);
        assert!(lines.lock().unwrap().is_empty());
    }
}
