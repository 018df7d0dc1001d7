//! Attaches the shared configuration to each request.

use std::sync::Arc;

use super::{Middleware, Next};
use crate::config::Config;
use crate::request::Request;
use crate::response::Response;

/// Puts one shared [`Config`] into every request's
/// [`Context`](crate::Context).
///
/// The config is reference-counted, never copied: every request sees the
/// same instance.
pub struct InjectConfig {
    config: Arc<Config>,
}

impl InjectConfig {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

impl Middleware for InjectConfig {
    async fn handle(&self, mut req: Request, next: Next) -> Response {
        req.context_mut().set_config(Arc::clone(&self.config));
        next.run(req).await
    }
}
