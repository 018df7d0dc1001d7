//! Cross-origin resource sharing.

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    HeaderMap, HeaderValue,
};
use tracing::debug;

use super::{Middleware, Next};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// Adds CORS headers to every response and answers preflight requests.
///
/// An `OPTIONS` request on any path gets `204 No Content` with the CORS
/// headers and nothing else: the layers inside this one and the handler
/// never see it.
pub struct Cors {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl Cors {
    /// Any origin; the usual REST verbs; `Content-Type` and `Authorization`.
    pub fn permissive() -> Self {
        Self {
            allow_origin: HeaderValue::from_static("*"),
            allow_methods: HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
            allow_headers: HeaderValue::from_static("Content-Type, Authorization"),
        }
    }

    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.clone());
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
    }
}

impl Default for Cors {
    fn default() -> Self { Self::permissive() }
}

impl Middleware for Cors {
    async fn handle(&self, req: Request, next: Next) -> Response {
        let mut res = if *req.method() == Method::Options {
            debug!(path = req.path(), "answering preflight");
            Response::status(Status::NoContent)
        } else {
            next.run(req).await
        };
        self.apply(res.headers_mut());
        res
    }
}
