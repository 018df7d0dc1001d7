//! Default JSON content type.

use http::header::{CONTENT_TYPE, HeaderValue};

use super::{Middleware, Next};
use crate::request::Request;
use crate::response::{JSON, Response};

/// Makes `application/json` the response content type.
///
/// Behaves like setting the header before the inner stages run: a stage
/// that picked its own content type (a plain-text error, say) keeps it.
/// Everything else leaves as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonContentType;

impl Middleware for JsonContentType {
    async fn handle(&self, req: Request, next: Next) -> Response {
        let mut res = next.run(req).await;
        res.headers_mut()
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static(JSON));
        res
    }
}
