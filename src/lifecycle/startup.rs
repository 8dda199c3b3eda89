//! Startup orchestration.
//!
//! # Responsibilities
//! - Register the configured route table into a mux
//! - Build the endpoints the bundled server answers with
//!
//! # Design Decisions
//! - Fail fast: the first registration fault aborts startup
//! - Routes register in file order, so errors point at the first bad entry

use axum::{body::Body, http::Request, Json};
use serde_json::json;

use crate::config::{MuxConfig, RouteConfig};
use crate::http::Endpoint;
use crate::routing::{path_params, MuxError, ServeMux};

/// Register every route in `routes`, building each handler with `make`.
pub fn register_routes<H, F>(
    mux: &ServeMux<H>,
    routes: &[RouteConfig],
    mut make: F,
) -> Result<(), MuxError>
where
    H: Clone,
    F: FnMut(&RouteConfig) -> H,
{
    for route in routes {
        mux.handle(&route.method, &route.pattern, make(route))?;
    }
    Ok(())
}

/// Endpoint answering `{"route": name, "params": {...}, "body": body}`.
pub fn echo_endpoint(route: &RouteConfig) -> Endpoint {
    let name = route.name.clone();
    let body = route.body.clone();

    Endpoint::new(move |req: Request<Body>| {
        let payload = json!({
            "route": name,
            "params": path_params(&req),
            "body": body,
        });
        async move { Json(payload) }
    })
}

/// Build the mux for `config`, answering every route with [`echo_endpoint`].
pub fn build_mux(config: &MuxConfig) -> Result<ServeMux<Endpoint>, MuxError> {
    let mux = ServeMux::new().trailing_slash(config.routing.trailing_slash);
    register_routes(&mux, &config.routes, echo_endpoint)?;

    tracing::info!(
        routes = config.routes.len(),
        trailing_slash = ?config.routing.trailing_slash,
        "Route table registered"
    );
    Ok(mux)
}
