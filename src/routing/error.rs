//! Registration and dispatch errors.

use thiserror::Error;

use crate::routing::tree::InsertError;

/// What went wrong, independent of the route it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Method outside the supported set.
    #[error("invalid method")]
    InvalidMethod,

    /// No handler was supplied.
    #[error("nil handler")]
    NilHandler,

    /// Pattern is missing its leading slash or has empty segments.
    #[error("invalid pattern")]
    InvalidPattern,

    /// A parameter names an unknown converter.
    #[error("invalid path param")]
    InvalidPathParam,

    /// The pattern conflicts with an edge already in the tree.
    #[error("multiple types for path param")]
    MultiplePathParamTypes,

    /// The method is already registered for this pattern.
    #[error("duplicate handler")]
    DuplicateHandler,

    /// No route matches the request.
    #[error("not found")]
    NotFound,
}

impl From<InsertError> for ErrorKind {
    fn from(err: InsertError) -> Self {
        match err {
            InsertError::InvalidPathParam(_) => ErrorKind::InvalidPathParam,
            InsertError::MultiplePathParamTypes => ErrorKind::MultiplePathParamTypes,
        }
    }
}

/// An [`ErrorKind`] together with the method and pattern (or path) involved.
///
/// Every kind except [`ErrorKind::NotFound`] is a registration fault and
/// should abort startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mux: handler ({method}) {pattern} error: {kind}")]
pub struct MuxError {
    method: String,
    pattern: String,
    kind: ErrorKind,
}

impl MuxError {
    pub fn new(method: impl Into<String>, pattern: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            method: method.into(),
            pattern: pattern.into(),
            kind,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}
