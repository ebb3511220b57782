// Connection handling module
// Serves a single TCP connection with hyper's HTTP/1 implementation

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;

use crate::handler::{Handler, PeerAddr};
use crate::logger::Logger;

/// Drop the body and record the peer, producing what handlers consume
fn into_handler_request(req: Request<Incoming>, peer_addr: SocketAddr) -> Request<()> {
    let (mut parts, _body) = req.into_parts();
    parts.extensions.insert(PeerAddr(peer_addr));
    Request::from_parts(parts, ())
}

/// Handle a single connection in a spawned task.
///
/// Each request is passed to `app`; connection-level failures are logged and
/// never affect other connections.
pub fn spawn_connection<H: Handler>(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    app: Arc<H>,
    logger: Logger,
    keep_alive: bool,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req: Request<Incoming>| {
            let app = Arc::clone(&app);
            async move {
                let resp = app.call(into_handler_request(req, peer_addr)).await;
                Ok::<_, Infallible>(resp)
            }
        });

        let conn = http1::Builder::new()
            .keep_alive(keep_alive)
            .serve_connection(io, service);

        if let Err(err) = conn.await {
            // Clients hanging up mid-request are routine
            if !err.is_incomplete_message() {
                logger.log_connection_error(&err);
            }
        }
    });
}
