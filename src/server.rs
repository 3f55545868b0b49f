//! Accept loop serving [`service::handle`](crate::service::handle) over HTTP/1.

use crate::config::ServiceConfig;
use crate::service;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Serves connections from `listener` until `shutdown` resolves.
///
/// Each connection runs on its own task. Connections already accepted keep
/// running after shutdown until their client is done.
pub async fn serve<F>(listener: TcpListener, config: Arc<ServiceConfig>, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        let accepted = tokio::select! {
            accepted = listener.accept() => accepted,
            _ = &mut shutdown => {
                info!("shutting down, no longer accepting connections");
                return Ok(());
            }
        };

        let (socket, remote_addr) = match accepted {
            Ok(conn) => conn,
            Err(err) => {
                warn!("failed to accept connection: {}", err);

                if let Some(backoff) = accept_backoff(&err) {
                    tokio::select! {
                        _ = tokio::time::sleep(backoff) => {}
                        _ = &mut shutdown => {
                            info!("shutting down, no longer accepting connections");
                            return Ok(());
                        }
                    }
                }
                continue;
            }
        };

        let socket = TokioIo::new(socket);
        let config = Arc::clone(&config);

        tokio::spawn(async move {
            let service = service_fn(move |req| service::handle(req, Arc::clone(&config)));

            if let Err(err) = http1::Builder::new().serve_connection(socket, service).await {
                warn!("error serving connection from {}: {}", remote_addr, err);
            }
        });
    }
}

/// How long to wait before accepting again after `err`.
///
/// Errors tied to a single connection are retried at once. Anything else, such
/// as running out of file descriptors, would fail again immediately.
fn accept_backoff(err: &io::Error) -> Option<Duration> {
    match err.kind() {
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionAborted | io::ErrorKind::ConnectionReset => None,
        _ => Some(ACCEPT_ERROR_BACKOFF),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_backoff() {
        let err = io::Error::from(io::ErrorKind::ConnectionAborted);
        assert_eq!(accept_backoff(&err), None);

        let err = io::Error::from(io::ErrorKind::ConnectionReset);
        assert_eq!(accept_backoff(&err), None);

        // EMFILE
        let err = io::Error::from_raw_os_error(24);
        assert_eq!(accept_backoff(&err), Some(ACCEPT_ERROR_BACKOFF));

        let err = io::Error::new(io::ErrorKind::Other, "too many open files");
        assert_eq!(accept_backoff(&err), Some(ACCEPT_ERROR_BACKOFF));
    }
}
