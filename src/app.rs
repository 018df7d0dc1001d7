//! The greeting application: one route behind six layers.
//!
//! | Layer | Registered | Runs on the way in |
//! |---|---|---|
//! | [`InjectConfig`] | 1st | 6th |
//! | [`Logging`] | 2nd | 5th |
//! | [`Timing`] | 3rd | 4th |
//! | [`Authenticate`] | 4th | 3rd |
//! | [`JsonContentType`] | 5th | 2nd |
//! | [`Cors`] | 6th | 1st |
//!
//! Cors sits outermost so preflights are answered before anything else and
//! every other response, 401s included, carries its headers.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::config::Config;
use crate::method::Method;
use crate::middleware::{Authenticate, Cors, InjectConfig, JsonContentType, Logging, Timing};
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// Placeholder shared secret. There is no rotation and no external source.
pub const DEFAULT_AUTH_TOKEN: &str = "secretKey";

pub const DEFAULT_APP_NAME: &str = "MyGO(Passed from configMiddleware)";

/// Simulated work done by [`home`] before it answers.
pub const PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Builds the application router with its full middleware stack.
pub fn router(config: Config, auth_token: &str) -> Router {
    Router::new()
        .on(Method::Get, "/", home)
        .layer(InjectConfig::new(Arc::new(config)))
        .layer(Logging)
        .layer(Timing)
        .layer(Authenticate::new(auth_token))
        .layer(JsonContentType)
        .layer(Cors::permissive())
}

/// `GET /` — greets with the configured application name.
///
/// Fails closed with `500` when no [`Config`] was injected.
pub async fn home(req: Request) -> Response {
    let Some(config) = req.context().config() else {
        error!(path = req.path(), "configuration missing from request context");
        return Response::error(Status::InternalServerError, "Configuration not found in context");
    };

    let greeting = format!("Hello, I'm {}", config.app);
    debug!(app = %config.app, "preparing greeting");
    tokio::time::sleep(PROCESSING_DELAY).await;

    Response::body(greeting)
}
