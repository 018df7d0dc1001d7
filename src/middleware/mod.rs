//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the place for
//! cross-cutting concerns. Each middleware receives the request and a
//! [`Next`] handle to the rest of the chain; it may inspect or modify the
//! request, return early without calling `next`, or post-process whatever
//! `next` returned.
//!
//! # Ordering
//!
//! Layers are registered with [`Router::layer`](crate::Router::layer) and
//! composed once, at startup, by folding over the registration list: every
//! layer wraps all the layers registered before it. The **last registered
//! layer is the outermost** and sees the request first:
//!
//! ```text
//! Router::new().layer(a).layer(b).layer(c)
//!
//!   request  → c → b → a → routes → handler
//!   response ← c ← b ← a ← routes ← handler
//! ```
//!
//! Built-in middleware:
//! - [`Cors`] — permissive CORS headers, answers preflight `OPTIONS` itself
//! - [`JsonContentType`] — `application/json` unless the handler chose otherwise
//! - [`Authenticate`] — shared-secret `X-Auth-Token` check
//! - [`Timing`] — logs request latency
//! - [`Logging`] — logs method, path and peer address
//! - [`InjectConfig`] — attaches the shared [`Config`](crate::Config) to the request context

mod auth;
mod content_type;
mod cors;
mod inject;
mod logging;
mod timing;

pub use auth::{AUTH_HEADER, Authenticate};
pub use content_type::JsonContentType;
pub use cors::Cors;
pub use inject::InjectConfig;
pub use logging::Logging;
pub use timing::Timing;

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedStage, Stage};
use crate::request::Request;
use crate::response::Response;

/// A request/response interceptor.
///
/// Implement it with a plain `async fn`:
///
/// ```rust
/// use onion::middleware::{Middleware, Next};
/// use onion::{Request, Response};
///
/// struct PoweredBy;
///
/// impl Middleware for PoweredBy {
///     async fn handle(&self, req: Request, next: Next) -> Response {
///         let mut res = next.run(req).await;
///         res.headers_mut().insert("x-powered-by", "onion".parse().unwrap());
///         res
///     }
/// }
/// ```
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> impl Future<Output = Response> + Send;
}

/// The remainder of the chain, from the point of view of one middleware.
///
/// Consumed by [`Next::run`]; dropping it instead short-circuits everything
/// further in.
pub struct Next(BoxedStage);

impl Next {
    pub async fn run(self, req: Request) -> Response {
        self.0.call(req).await
    }
}

/// One registered middleware, waiting to be wrapped around the stage inside it.
pub(crate) type BoxedLayer = Box<dyn FnOnce(BoxedStage) -> BoxedStage + Send>;

pub(crate) fn boxed_layer<M: Middleware>(middleware: M) -> BoxedLayer {
    Box::new(move |next: BoxedStage| -> BoxedStage {
        Arc::new(Layered { middleware: Arc::new(middleware), next })
    })
}

/// Composes `layers` around `inner`. The first layer ends up innermost.
pub(crate) fn compose(inner: BoxedStage, layers: Vec<BoxedLayer>) -> BoxedStage {
    layers.into_iter().fold(inner, |next, layer| layer(next))
}

struct Layered<M> {
    middleware: Arc<M>,
    next: BoxedStage,
}

impl<M: Middleware> Stage for Layered<M> {
    fn call(&self, req: Request) -> BoxFuture {
        let middleware = Arc::clone(&self.middleware);
        let next = Next(Arc::clone(&self.next));
        Box::pin(async move { middleware.handle(req, next).await })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{Method, Router, Status};

    type Trace = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        name: String,
        trace: Trace,
    }

    impl Middleware for Recorder {
        async fn handle(&self, req: Request, next: Next) -> Response {
            self.trace.lock().unwrap().push(format!("{} in", self.name));
            let res = next.run(req).await;
            self.trace.lock().unwrap().push(format!("{} out", self.name));
            res
        }
    }

    struct Reject;

    impl Middleware for Reject {
        async fn handle(&self, _req: Request, _next: Next) -> Response {
            Response::status(Status::Unauthorized)
        }
    }

    fn router_with_handler(trace: &Trace) -> Router {
        let trace = Arc::clone(trace);
        Router::new().on(Method::Get, "/", move |_req: Request| {
            let trace = Arc::clone(&trace);
            async move {
                trace.lock().unwrap().push("handler".to_owned());
                Response::text("done")
            }
        })
    }

    /// Heap's algorithm, collecting every ordering of `items`.
    fn permutations(items: &mut Vec<&'static str>, k: usize, out: &mut Vec<Vec<&'static str>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        permutations(items, k - 1, out);
        for i in 0..k - 1 {
            let j = if k % 2 == 0 { i } else { 0 };
            items.swap(j, k - 1);
            permutations(items, k - 1, out);
        }
    }

    fn expected_trace(order: &[&str]) -> Vec<String> {
        let inbound = order.iter().rev().map(|n| format!("{n} in"));
        let outbound = order.iter().map(|n| format!("{n} out"));
        inbound
            .chain(std::iter::once("handler".to_owned()))
            .chain(outbound)
            .collect()
    }

    #[tokio::test]
    async fn last_registered_runs_first() {
        let trace = Trace::default();
        let mut router = router_with_handler(&trace);
        for name in ["a", "b", "c"] {
            router = router.layer(Recorder { name: name.to_owned(), trace: Arc::clone(&trace) });
        }

        let res = router.into_service().call(Request::test(Method::Get, "/")).await;

        assert_eq!(res.body_bytes(), b"done");
        assert_eq!(
            *trace.lock().unwrap(),
            ["c in", "b in", "a in", "handler", "a out", "b out", "c out"],
        );
    }

    #[tokio::test]
    async fn nesting_follows_registration_for_every_permutation() {
        let mut names = vec!["cors", "json", "auth", "timing", "logging", "config"];
        let mut orders = Vec::new();
        let len = names.len();
        permutations(&mut names, len, &mut orders);
        assert_eq!(orders.len(), 720);

        for order in orders {
            let trace = Trace::default();
            let router = order.iter().fold(router_with_handler(&trace), |router, name| {
                router.layer(Recorder { name: (*name).to_owned(), trace: Arc::clone(&trace) })
            });

            router.into_service().call(Request::test(Method::Get, "/")).await;

            assert_eq!(*trace.lock().unwrap(), expected_trace(&order), "order {order:?}");
        }
    }

    #[tokio::test]
    async fn short_circuit_skips_inner_layers_and_handler() {
        let trace = Trace::default();
        let router = router_with_handler(&trace)
            .layer(Recorder { name: "inner".to_owned(), trace: Arc::clone(&trace) })
            .layer(Reject)
            .layer(Recorder { name: "outer".to_owned(), trace: Arc::clone(&trace) });

        let res = router.into_service().call(Request::test(Method::Get, "/")).await;

        assert_eq!(res.status_code(), http::StatusCode::UNAUTHORIZED);
        assert_eq!(*trace.lock().unwrap(), ["outer in", "outer out"]);
    }
}
