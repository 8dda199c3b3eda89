//! Trie node and the structural conflict rule.
//!
//! Children of one node obey:
//!
//! ```text
//!      literal | param | slash
//!  1)     0    |   0   |  0/1   -> empty, or slash only
//!  2)     0    |   1   |  0/1   -> one param edge, optionally with slash
//!  3)    n>0   |   0   |  0/1   -> any number of literals, optionally with slash
//! ```
//!
//! A param edge and a literal edge under the same node is always a conflict.

use axum::http::Method;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::routing::converter::Converter;
use crate::routing::segment::Segment;

/// Handlers registered at one node, keyed by HTTP method.
pub type HandlerTable<H> = HashMap<Method, H>;

/// Structural category of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Entry point of the tree. Only the root has this kind.
    Root,
    Literal,
    Param,
    Slash,
}

impl NodeKind {
    /// Kind of the node a pattern segment creates.
    pub(crate) fn of(segment: &Segment<'_>) -> Self {
        match segment {
            Segment::Literal(_) => NodeKind::Literal,
            Segment::Param(_) => NodeKind::Param,
            Segment::Slash => NodeKind::Slash,
        }
    }
}

/// One node of the routing trie.
///
/// `Clone` is a structural deep copy; handler tables and converters are
/// shared through their `Arc`s.
#[derive(Debug)]
pub struct Node<H> {
    pub(crate) kind: NodeKind,
    pub(crate) converter: Option<Arc<Converter>>,
    pub(crate) handlers: Option<Arc<HandlerTable<H>>>,
    pub(crate) children: HashMap<String, Node<H>>,
}

impl<H> Clone for Node<H> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            converter: self.converter.clone(),
            handlers: self.handlers.clone(),
            children: self.children.clone(),
        }
    }
}

impl<H> Node<H> {
    /// A fresh root node.
    pub fn root() -> Self {
        Self::new(NodeKind::Root, None)
    }

    pub(crate) fn new(kind: NodeKind, converter: Option<Arc<Converter>>) -> Self {
        Self {
            kind,
            converter,
            handlers: None,
            children: HashMap::new(),
        }
    }


    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn converter(&self) -> Option<&Arc<Converter>> {
        self.converter.as_ref()
    }

    pub fn handlers(&self) -> Option<&Arc<HandlerTable<H>>> {
        self.handlers.as_ref()
    }

    pub fn child(&self, label: &str) -> Option<&Node<H>> {
        self.children.get(label)
    }

    /// Whether `other` uses the identical converter (or both have none).
    pub(crate) fn same_converter(&self, other: Option<&Arc<Converter>>) -> bool {
        match (&self.converter, other) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn has_child_of(&self, kind: NodeKind) -> bool {
        self.children.values().any(|c| c.kind == kind)
    }

    /// Whether a new child of `kind` may be added under the conflict rule.
    ///
    /// A param edge never sits next to a literal edge.
    pub(crate) fn accepts(&self, kind: NodeKind) -> bool {
        match kind {
            NodeKind::Param => !self.has_child_of(NodeKind::Literal),
            NodeKind::Literal => !self.has_child_of(NodeKind::Param),
            NodeKind::Slash | NodeKind::Root => true,
        }
    }

    /// Serializable view of this node and its subtree.
    pub fn snapshot(&self) -> NodeSnapshot {
        let mut methods: Vec<String> = self
            .handlers
            .iter()
            .flat_map(|table| table.keys().map(|m| m.as_str().to_string()))
            .collect();
        methods.sort();

        NodeSnapshot {
            kind: self.kind,
            converter: self.converter.as_ref().map(|c| c.name().to_string()),
            has_handlers: self.handlers.is_some(),
            methods,
            children: self
                .children
                .iter()
                .map(|(label, child)| (label.clone(), child.snapshot()))
                .collect(),
        }
    }
}

/// Structural view of a subtree, comparable and printable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converter: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_handlers: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, NodeSnapshot>,
}

impl NodeSnapshot {
    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(NodeSnapshot::node_count).sum::<usize>()
    }

    /// Every (method, pattern) pair registered below this node.
    ///
    /// Param edges print as `:<converter>`.
    pub fn routes(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.collect_routes(String::new(), &mut out);
        out
    }

    fn collect_routes(&self, prefix: String, out: &mut Vec<(String, String)>) {
        let pattern = if prefix.is_empty() {
            "/".to_string()
        } else {
            prefix.clone()
        };
        if self.kind != NodeKind::Root {
            for method in &self.methods {
                out.push((method.clone(), pattern.clone()));
            }
        }

        for (label, child) in &self.children {
            let next = match child.kind {
                NodeKind::Slash => format!("{}/", prefix),
                NodeKind::Param => format!(
                    "{}/:{}",
                    prefix,
                    child.converter.as_deref().unwrap_or_default()
                ),
                _ => format!("{}/{}", prefix, label),
            };
            child.collect_routes(next, out);
        }
    }
}
