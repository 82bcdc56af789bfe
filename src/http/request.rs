//! Request identity middleware.
//!
//! # Responsibilities
//! - Stamp every request with a unique ID before any other layer runs
//! - Reuse an ID the client already sent in `x-request-id`
//! - Expose the ID to handlers via a request extension
//! - Echo the ID back to the client on the response
//!
//! # Design Decisions
//! - IDs are UUID v4; collision resistance matters more than ordering here
//! - The middleware never rejects a request, a malformed inbound ID is
//!   replaced instead of refused

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use axum::response::Response;
use tower::{Layer, Service};
use uuid::Uuid;

/// Header carrying the request ID on both requests and responses.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Unique identifier attached to a single request.
#[derive(Debug, Clone)]
pub struct RequestId(String);

impl RequestId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accessor for the ID stamped by [`RequestIdLayer`].
pub trait RequestIdExt {
    /// The request's ID, if the middleware has run.
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions().get::<RequestId>().map(RequestId::as_str)
    }
}

/// Tower layer that wraps the router in [`RequestIdService`].
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

/// Middleware service that assigns and propagates request IDs.
#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let (id, header) = match req.headers().get(X_REQUEST_ID).cloned() {
            Some(value) => match value.to_str() {
                Ok(s) => {
                    let id = RequestId(s.to_string());
                    (id, value)
                }
                Err(_) => fresh_id(),
            },
            None => fresh_id(),
        };

        req.headers_mut().insert(X_REQUEST_ID, header.clone());
        req.extensions_mut().insert(id);

        // Swap in the clone so the polled-ready instance handles this call.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            response.headers_mut().insert(X_REQUEST_ID, header);
            Ok(response)
        })
    }
}

fn fresh_id() -> (RequestId, HeaderValue) {
    let id = RequestId::generate();
    // UUID v4 strings only contain hex digits and hyphens.
    let header = HeaderValue::from_str(id.as_str())
        .unwrap_or_else(|_| HeaderValue::from_static("00000000-0000-0000-0000-000000000000"));
    (id, header)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_request_id_ext_reads_extension() {
        let mut req = Request::new(Body::empty());
        assert_eq!(req.request_id(), None);

        req.extensions_mut().insert(RequestId("abc-123".to_string()));
        assert_eq!(req.request_id(), Some("abc-123"));
    }
}
