//! Type-erased request handlers stored in the route table.

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by an [`Endpoint`].
pub type ResponseFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A cloneable async handler `Request<Body> -> Response`.
///
/// Captured path params are in the request extensions; read them with
/// [`path_params`](crate::routing::path_params).
#[derive(Clone)]
pub struct Endpoint {
    inner: Arc<dyn Fn(Request<Body>) -> ResponseFuture + Send + Sync>,
}

impl Endpoint {
    pub fn new<F, Fut, R>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        Self {
            inner: Arc::new(move |req: Request<Body>| -> ResponseFuture {
                let fut = f(req);
                Box::pin(async move { fut.await.into_response() })
            }),
        }
    }

    pub async fn call(&self, req: Request<Body>) -> Response {
        (self.inner)(req).await
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint").finish_non_exhaustive()
    }
}
