//! Path splitting and segment classification.
//!
//! # Responsibilities
//! - Split a pattern or request path into segment tokens
//! - Distinguish "ends in /" from "double slash"
//! - Classify pattern segments as literal, parameter, or trailing slash
//!
//! # Design Decisions
//! - A trailing slash becomes one synthetic `/` segment, never an empty string
//! - Any other empty segment is a structural error
//! - Segments borrow from the input; nothing is allocated besides the Vec

use thiserror::Error;

/// Delimiter between segments and the trailing-slash marker.
pub const SLASH: &str = "/";

/// Prefix of a parameter declaration and the canonical parameter edge label.
pub const PARAM: &str = ":";

/// Structural problems found while splitting a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The path does not start with `/`.
    #[error("path must start with '/'")]
    MissingRoot,

    /// An interior segment is empty (`//`).
    #[error("empty segment at position {index}")]
    EmptySegment { index: usize },
}

/// Split `path` into segments.
///
/// `"/a/b/"` yields `["a", "b", "/"]` and `"/"` yields `["/"]`.
pub fn split(path: &str) -> Result<Vec<&str>, SplitError> {
    let rest = path.strip_prefix(SLASH).ok_or(SplitError::MissingRoot)?;

    let mut segments: Vec<&str> = rest.split(SLASH).collect();

    // split always yields at least one item
    if let Some(last) = segments.last_mut() {
        if last.is_empty() {
            *last = SLASH;
        }
    }

    if let Some(index) = segments.iter().position(|s| s.is_empty()) {
        return Err(SplitError::EmptySegment { index });
    }

    Ok(segments)
}

/// A pattern segment after classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Matched by exact string equality.
    Literal(&'a str),
    /// `:name`, where `name` selects a converter (possibly empty).
    Param(&'a str),
    /// The synthetic trailing `/`.
    Slash,
}

impl<'a> Segment<'a> {
    /// Classify a raw (non-empty) segment produced by [`split`].
    pub fn classify(raw: &'a str) -> Self {
        if raw == SLASH {
            Segment::Slash
        } else if let Some(name) = raw.strip_prefix(PARAM) {
            Segment::Param(name)
        } else {
            Segment::Literal(raw)
        }
    }

    /// The edge label under which this segment is stored in a node's children.
    ///
    /// All parameters collapse to [`PARAM`] regardless of converter name.
    pub fn label(&self) -> &'a str {
        match self {
            Segment::Literal(s) => s,
            Segment::Param(_) => PARAM,
            Segment::Slash => SLASH,
        }
    }
}
