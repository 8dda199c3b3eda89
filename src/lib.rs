//! Segment-trie HTTP request multiplexer.
//!
//! Routes are `(method, pattern)` pairs such as `("GET", "/catalog/:int")`.
//! Registration validates the pattern against the existing table and either
//! publishes the extended table atomically or leaves it untouched; dispatch
//! walks the published table, converting typed parameters on the way.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::MuxConfig;
pub use http::{Endpoint, HttpServer};
pub use lifecycle::Shutdown;
pub use routing::{ErrorKind, MuxError, PathParams, ServeMux};
