//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router with the mux as its only handler
//! - Wire up middleware (tracing, timeout)
//! - Dispatch requests through the route table; unmatched → 404
//! - Serve until the shutdown signal fires

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::MuxConfig;
use crate::http::endpoint::Endpoint;
use crate::lifecycle::shutdown;
use crate::routing::ServeMux;

/// Body of every "no route" response.
pub const NOT_FOUND_BODY: &str = "404 page not found";

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub mux: Arc<ServeMux<Endpoint>>,
}

/// HTTP server fronting a [`ServeMux`].
pub struct HttpServer {
    router: Router,
    config: MuxConfig,
}

impl HttpServer {
    pub fn new(config: MuxConfig, mux: Arc<ServeMux<Endpoint>>) -> Self {
        let router = Self::build_router(&config, AppState { mux });
        Self { router, config }
    }

    #[allow(deprecated)]
    fn build_router(config: &MuxConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The assembled Axum router, e.g. for `tower::ServiceExt::oneshot`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &MuxConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request through the mux and run the matched endpoint.
async fn dispatch(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    match state.mux.resolve_request(&mut request) {
        Ok(endpoint) => endpoint.call(request).await,
        Err(err) => {
            tracing::debug!(method = %err.method(), path = %err.pattern(), "No route matched");
            (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::path_params;
    use tower::ServiceExt;

    async fn send(server: &HttpServer, method: &str, uri: &str) -> (StatusCode, String) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let res = server.router().oneshot(req).await.unwrap();
        let status = res.status();
        let body = axum::body::to_bytes(res.into_body(), 64 * 1024).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn server() -> HttpServer {
        let mux = ServeMux::new();
        mux.handle(
            "GET",
            "/catalog/:int",
            Endpoint::new(|req: Request<Body>| async move {
                format!("item {}", path_params(&req).int(0).unwrap_or(-1))
            }),
        )
        .unwrap();
        mux.handle("GET", "/", Endpoint::new(|_req| async { "home" }))
            .unwrap();
        HttpServer::new(MuxConfig::default(), Arc::new(mux))
    }

    #[tokio::test]
    async fn test_dispatch_with_params() {
        let server = server();
        assert_eq!(
            send(&server, "GET", "/catalog/42").await,
            (StatusCode::OK, "item 42".to_string())
        );
        assert_eq!(
            send(&server, "GET", "/").await,
            (StatusCode::OK, "home".to_string())
        );
    }

    #[tokio::test]
    async fn test_dispatch_not_found() {
        let server = server();
        for (method, uri) in [("GET", "/catalog/x"), ("POST", "/catalog/42"), ("GET", "/nope")] {
            assert_eq!(
                send(&server, method, uri).await,
                (StatusCode::NOT_FOUND, NOT_FOUND_BODY.to_string()),
                "{method} {uri}"
            );
        }
    }

    #[tokio::test]
    async fn test_routes_added_after_start_are_served() {
        let mux = Arc::new(ServeMux::new());
        let server = HttpServer::new(MuxConfig::default(), mux.clone());
        assert_eq!(send(&server, "GET", "/late").await.0, StatusCode::NOT_FOUND);

        mux.handle("GET", "/late", Endpoint::new(|_req| async { "late" }))
            .unwrap();
        assert_eq!(send(&server, "GET", "/late").await.0, StatusCode::OK);
    }
}
