//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing (registration at debug, conversion failures at trace)
//! http (dispatch misses at debug, server lifecycle at info)
//!     → logging.rs (tracing subscriber, env filter)
//!     → stdout
//! ```

pub mod logging;

pub use logging::init_logging;
