//! `onion` binary: serves the greeting application on port 8080.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).
//!
//!   cargo run
//!   curl -H 'X-Auth-Token: secretKey' http://localhost:8080/

use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use onion::app::{self, DEFAULT_APP_NAME, DEFAULT_AUTH_TOKEN};
use onion::{Config, Server};

const LISTEN_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let router = app::router(Config::new(DEFAULT_APP_NAME), DEFAULT_AUTH_TOKEN);

    let server = match Server::bind(LISTEN_ADDR).await {
        Ok(server) => server,
        Err(e) => {
            error!(addr = LISTEN_ADDR, "failed to start: {e}");
            return ExitCode::FAILURE;
        }
    };

    match server.serve(router).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}
