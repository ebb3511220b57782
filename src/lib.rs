//! Minimal HTTP server for measuring round-trip latency
//!
//! Three endpoints: the index page at `/`, a timestamp probe at `/ping-latency`
//! and a liveness check at `/health` and `/healthz`.

pub mod app;
pub mod clock;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
