//! HTTP server and graceful shutdown.
//!
//! Every connection runs on its own tokio task and every request on that
//! connection is an independent future, so a slow handler only holds up its
//! own request.
//!
//! # Graceful shutdown
//!
//! On SIGTERM or Ctrl-C (or when the future passed to
//! [`Server::serve_with_shutdown`] resolves) the server:
//! 1. Immediately stops `listener.accept()` — no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from `serve`, which lets `main` exit cleanly.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Incoming};
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::handler::{BoxedStage, Stage};
use crate::method::Method;
use crate::request::Request;
use crate::router::Router;
use crate::status::Status;

/// The HTTP server.
pub struct Server {
    listener: TcpListener,
}

impl Server {
    /// Binds a listener on `addr`.
    ///
    /// Fails if `addr` is not a valid `host:port` string or the port cannot
    /// be bound. Both are fatal at startup.
    ///
    /// ```rust,no_run
    /// # async fn run() -> Result<(), onion::Error> {
    /// let server = onion::Server::bind("0.0.0.0:8080").await?;
    /// # Ok(()) }
    /// ```
    pub async fn bind(addr: &str) -> Result<Self, Error> {
        let addr: SocketAddr = addr.parse()?;
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    /// The address actually bound; useful after binding port `0`.
    pub fn local_addr(&self) -> Result<SocketAddr, Error> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves `router` until SIGTERM or Ctrl-C, then drains in-flight
    /// connections.
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Serves `router` until `signal` resolves, then drains in-flight
    /// connections.
    pub async fn serve_with_shutdown<F>(self, router: Router, signal: F) -> Result<(), Error>
    where
        F: Future<Output = ()> + Send,
    {
        let addr = self.listener.local_addr()?;

        // Layers are folded exactly once; every request shares the result.
        let service = router.into_service();

        info!(%addr, "onion listening");

        let mut tasks = tokio::task::JoinSet::new();
        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting even if
                // more connections are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = self.listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let service = Arc::clone(&service);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let service = Arc::clone(&service);
                            async move { dispatch(service, req, remote_addr).await }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            debug!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("onion stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Largest request body buffered before the chain runs. Anything bigger is
/// answered `413` by the route table, after the outer layers had their turn.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Converts one hyper request, runs it through the composed chain, and
/// converts the response back.
///
/// Never returns `Err`, and never answers on its own: every request,
/// including ones with an unknown method or an unreadable body, goes through
/// the full chain.
async fn dispatch(
    service: BoxedStage,
    req: hyper::Request<Incoming>,
    remote_addr: SocketAddr,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let (parts, body) = req.into_parts();
    let method = Method::from(&parts.method);

    let (body, body_error) = match read_body(body, MAX_BODY_BYTES).await {
        Ok(bytes) => (bytes, None),
        Err(status) => {
            warn!(peer = %remote_addr, ?status, "failed to read request body");
            (Bytes::new(), Some(status))
        }
    };

    let mut req = Request::new(method, parts.uri.path().to_owned(), parts.headers, body, remote_addr);
    req.body_error = body_error;
    Ok(service.call(req).await.into_inner())
}

/// Collects at most `limit` bytes of `body`.
async fn read_body<B>(body: B, limit: usize) -> Result<Bytes, Status>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(Status::ContentTooLarge),
        Err(e) => {
            debug!("body error: {e}");
            Err(Status::BadRequest)
        }
    }
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT (Ctrl-C). On Windows only Ctrl-C
/// is available.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
