//! Route tree with copy-on-write registration.
//!
//! # Responsibilities
//! - Extend the trie for one pattern without ever exposing a partial tree
//! - Walk the published trie for one request path
//!
//! # Design Decisions
//! - Registration works on a deep copy of the root and publishes it with a
//!   single `ArcSwap::store`; any failure drops the copy
//! - Writers are serialized by a mutex; readers never lock
//! - Handler tables are shared between copies and cloned only when written

use arc_swap::ArcSwap;
use axum::http::Method;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

use crate::routing::converter::ConverterRegistry;
use crate::routing::node::{HandlerTable, Node, NodeKind};
use crate::routing::params::PathParams;
use crate::routing::segment::{Segment, PARAM, SLASH};

/// Structural faults found while inserting a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// A parameter names a converter that is not registered.
    #[error("invalid path param: unknown converter {0:?}")]
    InvalidPathParam(String),

    /// The segment conflicts with an existing edge at the same position.
    #[error("multiple types for path param")]
    MultiplePathParamTypes,
}

/// How a request without a trailing slash treats a route declared with one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    /// `/a` and `/a/` are unrelated routes.
    #[default]
    Strict,
    /// `/a` falls back to `/a/` when `/a` has no handler for the method.
    Lenient,
}

/// Handler table of the node a registration resolved to.
///
/// Reads see the current table; the first write clones it into the staged
/// tree so the published tree is unaffected until commit.
pub struct HandlerSlot<'a, H> {
    table: &'a mut Arc<HandlerTable<H>>,
}

impl<H> HandlerSlot<'_, H> {
    pub fn get(&self, method: &Method) -> Option<&H> {
        self.table.get(method)
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.table.contains_key(method)
    }

    /// The shared table itself, for identity checks.
    pub fn table(&self) -> &Arc<HandlerTable<H>> {
        &*self.table
    }
}

impl<H: Clone> HandlerSlot<'_, H> {
    pub fn insert(&mut self, method: Method, handler: H) {
        Arc::make_mut(self.table).insert(method, handler);
    }
}

/// The trie behind a [`ServeMux`](crate::routing::ServeMux).
pub struct Tree<H> {
    root: ArcSwap<Node<H>>,
    writer: Mutex<()>,
}

impl<H> Tree<H> {
    pub fn new() -> Self {
        Self {
            root: ArcSwap::from_pointee(Node::root()),
            writer: Mutex::new(()),
        }
    }

    /// The currently published root.
    pub fn load(&self) -> Arc<Node<H>> {
        self.root.load_full()
    }

    /// Register `segments` and hand the resolved node's table to `register`.
    ///
    /// The walk happens on a deep copy of the tree. The copy is published only
    /// if every segment is accepted and `register` returns `Ok`; otherwise the
    /// live tree is left exactly as it was.
    pub fn insert<F, T, E>(
        &self,
        segments: &[&str],
        converters: &ConverterRegistry,
        register: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&mut HandlerSlot<'_, H>) -> Result<T, E>,
        E: From<InsertError>,
    {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut staged = Node::clone(&self.root.load());
        let target = walk_or_extend(&mut staged, segments, converters)?;

        let table = target
            .handlers
            .get_or_insert_with(|| Arc::new(HandlerTable::new()));
        let out = register(&mut HandlerSlot { table })?;

        self.root.store(Arc::new(staged));
        Ok(out)
    }

    /// Find the handler for `method` at `segments` on the published tree.
    pub fn lookup(
        &self,
        method: &Method,
        segments: &[&str],
        trailing_slash: TrailingSlash,
    ) -> Option<(H, PathParams)>
    where
        H: Clone,
    {
        let root = self.root.load();
        let mut node: &Node<H> = &root;
        let mut params = PathParams::new();

        for &segment in segments {
            if let Some(child) = node.child(segment).filter(|c| c.kind != NodeKind::Param) {
                node = child;
                continue;
            }

            let child = node.child(PARAM)?;
            let converter = child.converter.as_ref()?;
            match converter.convert(segment) {
                Ok(value) => params.push(value),
                Err(err) => {
                    tracing::trace!(error = %err, "Path param conversion failed");
                    return None;
                }
            }
            node = child;
        }

        if let Some(handler) = handler_at(node, method) {
            return Some((handler.clone(), params));
        }

        if trailing_slash == TrailingSlash::Lenient {
            let handler = node.child(SLASH).and_then(|slash| handler_at(slash, method))?;
            return Some((handler.clone(), params));
        }

        None
    }
}

impl<H> Default for Tree<H> {
    fn default() -> Self {
        Self::new()
    }
}

fn handler_at<'n, H>(node: &'n Node<H>, method: &Method) -> Option<&'n H> {
    node.handlers.as_ref().and_then(|table| table.get(method))
}

/// Descend from `node` along `segments`, creating missing nodes.
fn walk_or_extend<'n, H>(
    mut node: &'n mut Node<H>,
    segments: &[&str],
    converters: &ConverterRegistry,
) -> Result<&'n mut Node<H>, InsertError> {
    for &raw in segments {
        let segment = Segment::classify(raw);

        let converter = match segment {
            Segment::Param(name) => Some(
                converters
                    .lookup(name)
                    .ok_or_else(|| InsertError::InvalidPathParam(name.to_string()))?,
            ),
            Segment::Literal(_) | Segment::Slash => None,
        };

        let label = segment.label();
        let kind = NodeKind::of(&segment);

        let fits = match node.children.get(label) {
            Some(existing) => existing.same_converter(converter.as_ref()),
            None => node.accepts(kind),
        };
        if !fits {
            return Err(InsertError::MultiplePathParamTypes);
        }

        node = node
            .children
            .entry(label.to_string())
            .or_insert_with(|| Node::new(kind, converter));
    }

    Ok(node)
}
