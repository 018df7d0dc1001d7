//! # onion
//!
//! A minimal HTTP server: one endpoint wrapped in an ordered chain of
//! middleware. Nothing more. Nothing less.
//!
//! ## The model
//!
//! A [`Router`] holds routes and a list of [`middleware`] layers. When the
//! [`Server`] starts, the layers are folded around the routes once, each
//! layer wrapping all the layers registered before it. The result is a single
//! composed handler shared by every request.
//!
//! The last layer registered is the first to see a request and the last to
//! touch the response. Order is never rearranged behind your back.
//!
//! Request-scoped data lives in a typed [`Context`] carried by the
//! [`Request`] itself; middleware fills it in, handlers read it.
//!
//! Every request enters the chain, whatever its method and whether or not
//! its body could be read. Bodies are buffered up to [`MAX_BODY_BYTES`]
//! before the chain runs; larger ones reach the route table as `413`.
//! Slow-client protection, TLS and rate limiting belong to the proxy in
//! front (nginx, an ingress), not here.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use onion::middleware::{Cors, Logging};
//! use onion::{Method, Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), onion::Error> {
//!     let app = Router::new()
//!         .on(Method::Get, "/hello/{name}", hello)
//!         .layer(Logging)
//!         .layer(Cors::permissive());
//!
//!     Server::bind("0.0.0.0:3000").await?.serve(app).await
//! }
//!
//! async fn hello(req: Request) -> Response {
//!     let name = req.param("name").unwrap_or("stranger");
//!     Response::json(format!(r#"{{"hello":"{name}"}}"#))
//! }
//! ```
//!
//! The shipped application, `GET /` behind six layers, is built by
//! [`app::router`].

mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod app;
pub mod middleware;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::{Context, Request};
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::{MAX_BODY_BYTES, Server};
pub use status::Status;
