//! Custom routes and a custom layer on top of the built-in middleware.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example greeting
//!
//! Try:
//!   curl -i http://localhost:3000/hello/ana
//!   curl -i -X OPTIONS http://localhost:3000/hello/ana

use std::sync::Arc;

use http::HeaderValue;
use onion::middleware::{Cors, InjectConfig, JsonContentType, Logging, Middleware, Next, Timing};
use onion::{Config, Method, Request, Response, Router, Server};

/// Tags every response with the application name from the request context.
struct AppHeader;

impl Middleware for AppHeader {
    async fn handle(&self, req: Request, next: Next) -> Response {
        let app = req.context().config().map(|c| c.app.clone());
        let mut res = next.run(req).await;
        if let Some(value) = app.and_then(|a| HeaderValue::try_from(a).ok()) {
            res.headers_mut().insert("x-app", value);
        }
        res
    }
}

#[tokio::main]
async fn main() -> Result<(), onion::Error> {
    tracing_subscriber::fmt::init();

    // Registered before InjectConfig, so AppHeader runs inside it and finds
    // the config already in the context.
    let app = Router::new()
        .on(Method::Get, "/hello/{name}", hello)
        .layer(AppHeader)
        .layer(InjectConfig::new(Arc::new(Config::new("greeting-demo"))))
        .layer(Logging)
        .layer(Timing)
        .layer(JsonContentType)
        .layer(Cors::permissive());

    Server::bind("0.0.0.0:3000").await?.serve(app).await
}

async fn hello(req: Request) -> Response {
    let name = req.param("name").unwrap_or("stranger");
    Response::json(format!(r#"{{"hello":"{name}"}}"#))
}
