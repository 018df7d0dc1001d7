//! Radix-tree request router and middleware stack.
//!
//! One tree per HTTP method, O(path-length) lookup. The router is also where
//! middleware is registered: once the server starts, the routes become the
//! innermost stage and the layers are folded around them.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxFuture, BoxedStage, Stage, Handler};
use crate::method::Method;
use crate::middleware::{self, BoxedLayer, Middleware};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] and [`Router::layer`] call returns `self` so
/// registrations chain naturally.
pub struct Router {
    routes: Routes,
    layers: Vec<BoxedLayer>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Routes::default(), layers: Vec::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax — `req.param("name")` retrieves them:
    ///
    /// ```rust
    /// # use onion::{Method, Request, Response, Router};
    /// # async fn home(_: Request) -> Response { Response::text("") }
    /// # async fn greet(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get, "/",             home)
    ///     .on(Method::Get, "/hello/{name}", greet);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is malformed or conflicts with an existing route.
    /// Routes are fixed at startup, so this is a programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes.insert(method, path, handler.into_stage());
        self
    }

    /// Register a middleware. Returns `self` for chaining.
    ///
    /// Each layer wraps every layer registered before it, so the **last**
    /// one registered is the first to see a request:
    ///
    /// ```rust
    /// # use onion::{Router, middleware::{Cors, Authenticate}};
    /// // Cors runs first, so preflights never hit Authenticate.
    /// Router::new()
    ///     .layer(Authenticate::new("token"))
    ///     .layer(Cors::permissive());
    /// ```
    pub fn layer(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(middleware::boxed_layer(middleware));
        self
    }

    /// Folds the layers around the route table, producing the single
    /// handler every request goes through.
    pub(crate) fn into_service(self) -> BoxedStage {
        middleware::compose(Arc::new(self.routes), self.layers)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// The innermost stage: route lookup and dispatch.
#[derive(Default)]
struct Routes {
    by_method: HashMap<Method, MatchitRouter<BoxedStage>>,
}

impl Routes {
    fn insert(&mut self, method: Method, path: &str, handler: BoxedStage) {
        self.by_method
            .entry(method)
            .or_default()
            .insert(path, handler)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<(BoxedStage, HashMap<String, String>)> {
        let tree = self.by_method.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// True when some other method has a route for `path`.
    fn knows_path(&self, path: &str) -> bool {
        self.by_method.values().any(|tree| tree.at(path).is_ok())
    }
}

impl Stage for Routes {
    fn call(&self, mut req: Request) -> BoxFuture {
        if let Some(status) = req.body_error {
            return Box::pin(std::future::ready(Response::status(status)));
        }
        match self.lookup(&req.method, &req.path) {
            Some((handler, params)) => {
                req.params = params;
                handler.call(req)
            }
            None => {
                let status = if self.knows_path(&req.path) {
                    Status::MethodNotAllowed
                } else {
                    Status::NotFound
                };
                Box::pin(std::future::ready(Response::status(status)))
            }
        }
    }
}
