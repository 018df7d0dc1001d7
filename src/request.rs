//! Incoming HTTP request type and its per-request context.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http::HeaderMap;

use crate::config::Config;
use crate::method::Method;
use crate::status::Status;

/// Data attached to one in-flight request.
///
/// Starts empty, is filled in by middleware on the way in, and is dropped
/// together with the request. Never shared between requests.
#[derive(Clone, Debug, Default)]
pub struct Context {
    config: Option<Arc<Config>>,
}

impl Context {
    /// The shared configuration, if a middleware attached it.
    pub fn config(&self) -> Option<&Config> {
        self.config.as_deref()
    }

    pub fn set_config(&mut self, config: Arc<Config>) {
        self.config = Some(config);
    }
}

/// An incoming HTTP request with its body fully collected.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) remote_addr: SocketAddr,
    pub(crate) params: HashMap<String, String>,
    pub(crate) context: Context,
    /// Set when the body could not be read; the route table answers with
    /// this status instead of dispatching.
    pub(crate) body_error: Option<Status>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: HeaderMap,
        body: Bytes,
        remote_addr: SocketAddr,
    ) -> Self {
        Self {
            method,
            path,
            headers,
            body,
            remote_addr,
            params: HashMap::new(),
            context: Context::default(),
            body_error: None,
        }
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }
    pub fn remote_addr(&self) -> SocketAddr { self.remote_addr }

    /// Case-insensitive header lookup. Values that are not visible ASCII are
    /// treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn context(&self) -> &Context { &self.context }
    pub fn context_mut(&mut self) -> &mut Context { &mut self.context }
}

#[cfg(test)]
impl Request {
    /// Bare request for in-process tests: no body, loopback peer.
    pub(crate) fn test(method: Method, path: &str) -> Self {
        Self::new(
            method,
            path.to_owned(),
            HeaderMap::new(),
            Bytes::new(),
            SocketAddr::from(([127, 0, 0, 1], 40000)),
        )
    }

    pub(crate) fn with_body(mut self, body: &'static [u8]) -> Self {
        self.body = Bytes::from_static(body);
        self
    }

    pub(crate) fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.insert(name, http::HeaderValue::from_static(value));
        self
    }
}
