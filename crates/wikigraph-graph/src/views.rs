//! Serializable views of nodes and edges for external callers.

use crate::types::{Attributes, Edge, Node, NodeKind, Relation};
use serde::{Deserialize, Serialize};

/// A node as returned by lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    /// Node id.
    pub id: String,
    /// Node label.
    pub kind: NodeKind,
    /// All stored attributes.
    pub attributes: Attributes,
}

impl From<&Node> for NodeView {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            kind: node.kind,
            attributes: node.attributes.clone(),
        }
    }
}

/// An edge as returned by relationship lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeView {
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Edge type.
    pub relation: Relation,
    /// Edge attributes.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl From<&Edge> for EdgeView {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source_id.clone(),
            target: edge.target_id.clone(),
            relation: edge.relation,
            attributes: edge.attributes.clone(),
        }
    }
}
