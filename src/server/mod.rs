// Server module entry point
// Accept loop, per-connection tasks and shutdown signals

pub mod connection;
pub mod signal;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use socket2::{Domain, Socket, Type};
use tokio::net::TcpListener;

pub use connection::spawn_connection;
pub use signal::shutdown_signal;

use crate::handler::Handler;
use crate::logger::Logger;

/// Listen backlog for the accept queue
const BACKLOG: i32 = 1024;

/// Bind the server address with `SO_REUSEADDR`, so a restart can reclaim a
/// port whose old connections are still in TIME_WAIT.
///
/// Must be called from within a tokio runtime.
pub fn bind_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, None)?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;
    TcpListener::from_std(socket.into())
}

/// Accept connections and hand each to its own task until `shutdown` resolves
///
/// Accept errors (e.g. running out of file descriptors) are logged and the loop keeps going.
/// Connections already in flight are left to finish on their own.
pub async fn serve<H, F>(
    listener: TcpListener,
    app: Arc<H>,
    logger: Logger,
    keep_alive: bool,
    shutdown: F,
) where
    H: Handler,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        spawn_connection(stream, peer_addr, Arc::clone(&app), logger.clone(), keep_alive);
                    }
                    Err(e) => {
                        logger.error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                logger.log_shutdown();
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_app;
    use crate::clock::{Clock, SystemClock, UptimeTracker};
    use crate::config::Config;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use tokio::sync::oneshot;

    async fn raw_request(addr: SocketAddr, method: &str, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request =
            format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    async fn start() -> (SocketAddr, oneshot::Sender<()>, Arc<std::sync::Mutex<Vec<String>>>) {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let uptime = UptimeTracker::start(clock.as_ref());
        let (logger, lines) = Logger::capture();
        let app = build_app(&Config::defaults().unwrap(), &logger, clock, uptime);

        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(serve(listener, Arc::new(app), logger, true, async {
            rx.await.ok();
        }));
        (addr, tx, lines)
    }

    #[tokio::test]
    async fn test_binds_ephemeral_port_with_reuse_address() {
        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
        assert!(socket2::SockRef::from(&listener).reuse_address().unwrap());
    }

    #[tokio::test]
    async fn test_port_in_use_is_an_error() {
        let first = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let taken = first.local_addr().unwrap();
        assert!(bind_listener(taken).is_err());
    }

    #[tokio::test]
    async fn test_rebind_while_closed_connection_lingers() {
        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();

        let mut client = TcpStream::connect(addr).await.unwrap();
        let (accepted, _) = listener.accept().await.unwrap();
        // Server side closes first, leaving its end in TIME_WAIT
        drop(accepted);
        let mut rest = Vec::new();
        client.read_to_end(&mut rest).await.unwrap();
        drop(client);
        drop(listener);

        let rebound = bind_listener(addr).unwrap();
        assert_eq!(rebound.local_addr().unwrap(), addr);
    }

    #[tokio::test]
    async fn test_serves_endpoints_over_tcp() {
        let (addr, _stop, lines) = start().await;

        let health = raw_request(addr, "GET", "/health").await;
        assert!(health.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(health.contains("\"status\":\"healthy\""));

        let probe = raw_request(addr, "GET", "/ping-latency").await;
        assert!(probe.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(probe.to_lowercase().contains("access-control-allow-origin: *"));
        assert!(probe.contains("\"unix_milli\":"));

        let rejected = raw_request(addr, "DELETE", "/ping-latency").await;
        assert!(rejected.starts_with("HTTP/1.1 405 Method Not Allowed\r\n"));

        let missing = raw_request(addr, "GET", "/nonexistent").await;
        assert!(missing.starts_with("HTTP/1.1 404 Not Found\r\n"));

        // Only the 404 shows up in the access log
        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("GET    /nonexistent"));
    }

    #[tokio::test]
    async fn test_independent_servers_in_one_process() {
        let (first, _stop_first, _) = start().await;
        let (second, _stop_second, _) = start().await;
        assert_ne!(first, second);

        assert!(raw_request(first, "GET", "/healthz").await.contains("healthy"));
        assert!(raw_request(second, "GET", "/healthz").await.contains("healthy"));
    }

    #[tokio::test]
    async fn test_shutdown_stops_accepting() {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let uptime = UptimeTracker::start(clock.as_ref());
        let (logger, lines) = Logger::capture();
        let app = build_app(&Config::defaults().unwrap(), &logger, clock, uptime);

        let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, Arc::new(app), logger, true, async {
            rx.await.ok();
        }));

        tx.send(()).unwrap();
        server.await.unwrap();
        assert!(lines
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.starts_with("Shutdown signal received")));
    }
}
