use axum::extract::FromRequestParts;
use common_services::utils::random_hex;
use http::request::Parts;
use http::{HeaderName, HeaderValue, Request};
use std::convert::Infallible;
use tower_http::request_id::{MakeRequestId, RequestId};

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
const REQUEST_ID_BYTES: usize = 12;

/// Generates a 24 character hex id for requests that arrive without an `X-Request-ID`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeHexRequestId;

impl MakeRequestId for MakeHexRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&random_hex(REQUEST_ID_BYTES))
            .ok()
            .map(RequestId::new)
    }
}

/// The id of the current request, as set by `SetRequestIdLayer`. Empty if none is available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationId(pub String);

impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .extensions
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .or_else(|| {
                parts
                    .headers
                    .get(&X_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
            })
            .unwrap_or_default();
        Ok(Self(id.to_owned()))
    }
}
