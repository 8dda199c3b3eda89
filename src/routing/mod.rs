//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (method, pattern, handler)
//!     → segment.rs (split & classify)
//!     → tree.rs (walk a deep copy, create nodes under node.rs rules)
//!     → converter.rs (resolve `:name` to a converter)
//!     → publish the copy atomically, or drop it on any error
//!
//! Dispatch (per request):
//!     (method, path)
//!     → segment.rs (split; malformed = not found)
//!     → tree.rs (literal edge first, else convert through the param edge)
//!     → Return: handler + params.rs, or NotFound
//! ```
//!
//! # Design Decisions
//! - Conflicting edges are a registration error, never resolved by priority
//! - No wildcards, no regex: one segment consumes one edge
//! - Parameters are positional; converted values are typed

pub mod converter;
pub mod error;
pub mod mux;
pub mod node;
pub mod params;
pub mod segment;
pub mod tree;

pub use converter::{ConverterRegistry, ParamValue};
pub use error::{ErrorKind, MuxError};
pub use mux::{Resolved, ServeMux, SUPPORTED_METHODS};
pub use node::NodeSnapshot;
pub use params::{path_params, PathParams, RequestParamsExt};
pub use tree::TrailingSlash;
