//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Register routes → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or trigger() → Stop accepting → Drain in-flight → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error, including a route registration fault, is fatal
//! - Listener binds last (traffic only once the route table is complete)

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{build_mux, register_routes};
