//! HTTP status codes as a typed enum.
//!
//! Only the codes this server actually emits are named here. Use [`Status`]
//! anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use onion::{Response, Status};
//!
//! // status-only, no body
//! Response::status(Status::NoContent);
//!
//! // return Status directly from a handler — onion wraps it
//! async fn gone(_req: onion::Request) -> Status {
//!     Status::NotFound
//! }
//! ```

use http::StatusCode;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    NoContent,           // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    Unauthorized,        // 401
    NotFound,            // 404
    MethodNotAllowed,    // 405
    ContentTooLarge,     // 413

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl From<Status> for StatusCode {
    fn from(s: Status) -> StatusCode {
        match s {
            Status::Ok                  => StatusCode::OK,
            Status::NoContent           => StatusCode::NO_CONTENT,
            Status::BadRequest          => StatusCode::BAD_REQUEST,
            Status::Unauthorized        => StatusCode::UNAUTHORIZED,
            Status::NotFound            => StatusCode::NOT_FOUND,
            Status::MethodNotAllowed    => StatusCode::METHOD_NOT_ALLOWED,
            Status::ContentTooLarge     => StatusCode::PAYLOAD_TOO_LARGE,
            Status::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
