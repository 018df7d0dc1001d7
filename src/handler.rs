//! Pipeline stages and handler type erasure.
//!
//! [`Stage`] is the one interface every part of the request pipeline speaks:
//! route handlers, the route table itself, and each middleware layer once it
//! has been wrapped around the stage inside it. A stage takes a request and
//! returns a boxed future of the response, nothing more.
//!
//! Because middleware layers are stages too, composing the chain is a fold:
//! each layer consumes the [`BoxedStage`] inside it and yields a new one.
//!
//! ```text
//! async fn home(req: Request) -> Response { … }   ← user writes this
//!        ↓ router.on(Method::Get, "/", home)
//! Arc::new(FnHandler(home))                       ← BoxedStage (leaf)
//!        ↓ stored in the route table, itself a Stage
//! Arc::new(Layered { middleware, next: routes })  ← BoxedStage (layer)
//!        ↓ one per registered middleware
//! service.call(req)                               ← one vtable call per stage
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` so tokio can move it between worker threads.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// One step of the request pipeline: a handler, the route table, or a
/// middleware layer wrapped around the step inside it.
#[doc(hidden)]
pub trait Stage {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased stage of the request pipeline, shared across concurrent
/// requests.
#[doc(hidden)]
pub type BoxedStage = Arc<dyn Stage + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// Automatically satisfied for any `async fn` with the signature:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// Sealed: only the blanket impl below can satisfy it.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_stage(self) -> BoxedStage;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_stage(self) -> BoxedStage {
        Arc::new(FnHandler(self))
    }
}

/// Leaf stage: a concrete handler function behind the erased interface.
struct FnHandler<F>(F);

impl<F, Fut, R> Stage for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
