//! Request logging.

use tracing::info;

use super::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;

/// Logs method, path and peer address of each request before passing it on.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logging;

impl Middleware for Logging {
    async fn handle(&self, req: Request, next: Next) -> Response {
        info!(
            method = %req.method(),
            path = req.path(),
            remote = %req.remote_addr(),
            "request received",
        );
        next.run(req).await
    }
}
