//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace & timeout layers)
//!     → dispatch: ServeMux::resolve_request (params into extensions)
//!     → endpoint.rs (matched handler) or 404
//!     → Send to client
//! ```

pub mod endpoint;
pub mod server;

pub use endpoint::Endpoint;
pub use server::{AppState, HttpServer, NOT_FOUND_BODY};
