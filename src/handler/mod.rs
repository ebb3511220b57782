//! Request handler module
//!
//! Every endpoint, the route table and the access-log wrapper implement [`Handler`],
//! so they compose by value: `AccessLog<Router>` is what the server runs.

pub mod access_log;
pub mod health;
pub mod probe;
pub mod router;
pub mod static_page;

use crate::http::HttpResponse;
use hyper::Request;
use std::future::Future;
use std::net::SocketAddr;

pub use access_log::AccessLog;
pub use health::HealthCheck;
pub use probe::LatencyProbe;
pub use router::Router;
pub use static_page::StaticPage;

/// Something that turns a request into a response
///
/// Requests arrive without their body; no endpoint reads one.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request<()>) -> impl Future<Output = HttpResponse> + Send;
}

/// Peer address of the connection a request arrived on, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerAddr(pub SocketAddr);
