//! Request latency logging.

use std::time::Instant;

use tracing::info;

use super::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;

/// Logs wall-clock time spent in everything inside this layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timing;

impl Middleware for Timing {
    async fn handle(&self, req: Request, next: Next) -> Response {
        let start = Instant::now();
        let res = next.run(req).await;
        info!(
            status = res.status_code().as_u16(),
            elapsed = ?start.elapsed(),
            "request completed",
        );
        res
    }
}
