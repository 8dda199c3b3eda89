//! Request multiplexer: registration facade and dispatch entry point.

use axum::http::{Method, Request};
use std::fmt;

use crate::routing::converter::ConverterRegistry;
use crate::routing::error::{ErrorKind, MuxError};
use crate::routing::node::NodeSnapshot;
use crate::routing::params::PathParams;
use crate::routing::segment::split;
use crate::routing::tree::{TrailingSlash, Tree};

/// Methods accepted by [`ServeMux::handle`].
pub const SUPPORTED_METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
];

fn supported_method(method: &str) -> Option<Method> {
    SUPPORTED_METHODS
        .iter()
        .find(|m| m.as_str() == method)
        .cloned()
}

/// A successful dispatch.
#[derive(Debug, Clone)]
pub struct Resolved<H> {
    pub handler: H,
    pub params: PathParams,
}

/// HTTP request multiplexer over a segment trie.
///
/// Patterns are `/`-separated; a segment `:name` declares a parameter
/// converted by the converter registered under `name` (`""`, `str`, `int`
/// built in), and a trailing `/` makes a route distinct from the same
/// pattern without it.
///
/// Registration takes `&self`: the tree publishes each successful
/// registration atomically, so a mux shared behind `Arc` can keep serving
/// while routes are added.
pub struct ServeMux<H> {
    tree: Tree<H>,
    converters: ConverterRegistry,
    trailing_slash: TrailingSlash,
}

impl<H: Clone> ServeMux<H> {
    /// A mux with the built-in converters and strict trailing slashes.
    pub fn new() -> Self {
        Self::with_converters(ConverterRegistry::with_builtins())
    }

    pub fn with_converters(converters: ConverterRegistry) -> Self {
        Self {
            tree: Tree::new(),
            converters,
            trailing_slash: TrailingSlash::default(),
        }
    }

    /// Set the trailing slash policy used by dispatch.
    pub fn trailing_slash(mut self, policy: TrailingSlash) -> Self {
        self.trailing_slash = policy;
        self
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// Any error leaves the route table unchanged. Route tables are meant to
    /// be complete before serving starts, so callers should treat an error
    /// as fatal.
    pub fn handle(
        &self,
        method: &str,
        pattern: &str,
        handler: impl Into<Option<H>>,
    ) -> Result<(), MuxError> {
        let fail = |kind| MuxError::new(method, pattern, kind);

        let parsed = supported_method(method).ok_or_else(|| fail(ErrorKind::InvalidMethod))?;
        let handler = handler.into().ok_or_else(|| fail(ErrorKind::NilHandler))?;
        let segments = split(pattern).map_err(|_| fail(ErrorKind::InvalidPattern))?;

        self.tree
            .insert(&segments, &self.converters, |slot| {
                if slot.contains(&parsed) {
                    return Err(ErrorKind::DuplicateHandler);
                }
                slot.insert(parsed.clone(), handler);
                Ok(())
            })
            .map_err(fail)?;

        tracing::debug!(method = %method, pattern = %pattern, "Route registered");
        Ok(())
    }

    /// Find the handler for `method` and `path`.
    ///
    /// Malformed paths, unknown methods and failed parameter conversions all
    /// resolve to [`ErrorKind::NotFound`].
    pub fn resolve(&self, method: &str, path: &str) -> Result<Resolved<H>, MuxError> {
        let not_found = || MuxError::new(method, path, ErrorKind::NotFound);

        let segments = split(path).map_err(|_| not_found())?;
        let method = Method::from_bytes(method.as_bytes()).map_err(|_| not_found())?;

        let (handler, params) = self
            .tree
            .lookup(&method, &segments, self.trailing_slash)
            .ok_or_else(not_found)?;

        Ok(Resolved { handler, params })
    }

    /// Resolve `req` and attach any captured parameters to its extensions.
    pub fn resolve_request<B>(&self, req: &mut Request<B>) -> Result<H, MuxError> {
        let Resolved { handler, params } = self.resolve(req.method().as_str(), req.uri().path())?;

        if !params.is_empty() {
            req.extensions_mut().insert(params);
        }

        Ok(handler)
    }

    /// Structural view of the published route table.
    pub fn snapshot(&self) -> NodeSnapshot {
        self.tree.load().snapshot()
    }
}

impl<H> fmt::Debug for ServeMux<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServeMux")
            .field("trailing_slash", &self.trailing_slash)
            .field("routes", &self.tree.load().snapshot().routes())
            .finish()
    }
}

impl<H: Clone> Default for ServeMux<H> {
    fn default() -> Self {
        Self::new()
    }
}
