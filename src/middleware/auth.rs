//! Shared-secret authentication.

use http::header::HeaderName;
use tracing::{info, warn};

use super::{Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Name of the request header carrying the shared secret.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Rejects requests whose `X-Auth-Token` header is not exactly the
/// configured secret.
///
/// A rejected request gets `401 Unauthorized` with a plain-text body and
/// never reaches the layers inside this one.
pub struct Authenticate {
    header: HeaderName,
    token: String,
}

impl Authenticate {
    pub fn new(token: impl Into<String>) -> Self {
        Self { header: HeaderName::from_static(AUTH_HEADER), token: token.into() }
    }

    fn verify(&self, req: &Request) -> bool {
        req.headers()
            .get(&self.header)
            .is_some_and(|v| v.as_bytes() == self.token.as_bytes())
    }
}

impl Middleware for Authenticate {
    async fn handle(&self, req: Request, next: Next) -> Response {
        if !self.verify(&req) {
            warn!(path = req.path(), remote = %req.remote_addr(), "rejected request with bad token");
            return Response::error(Status::Unauthorized, "Unauthorized");
        }
        info!("verified token");
        next.run(req).await
    }
}
