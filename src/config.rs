//! Application configuration shared with every request.

/// Immutable, process-wide configuration.
///
/// Built once in `main`, wrapped in an `Arc`, and attached to each request's
/// [`Context`](crate::Context) by the
/// [`InjectConfig`](crate::middleware::InjectConfig) middleware.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Application name, echoed back in the greeting.
    pub app: String,
}

impl Config {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into() }
    }
}
