//! The in-memory graph store.
//!
//! [`GraphStore`] owns a petgraph `DiGraph<Node, Edge>` plus two indexes
//! built at load time:
//!
//! - an id → `NodeIndex` map for O(1) lookup
//! - a per-node list of incident edges in input order, so neighbour
//!   iteration is O(degree) and deterministic
//!
//! A store is immutable after [`GraphStore::load`] and is shared across
//! threads behind an `Arc`.

use crate::types::{Attributes, Direction, Edge, Node, NodeKind, Relation};
use log::{debug, info};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde_json::Value;
use std::collections::HashMap;
use wikigraph_core::{Error, Result};

/// Read-only graph of articles, topics, authors, tags and communities.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    graph: DiGraph<Node, Edge>,
    node_indices: HashMap<String, NodeIndex>,
    incident: Vec<Vec<EdgeIndex>>,
    memberships: HashMap<NodeIndex, NodeIndex>,
}

impl GraphStore {
    /// Build a store from nodes and edges.
    ///
    /// Loading is all-or-nothing. The whole load is rejected with
    /// [`Error::Integrity`] if:
    ///
    /// - two nodes share an id
    /// - an edge references a node that does not exist
    /// - a `BELONGS_TO` edge targets anything but a community
    /// - an article belongs to more than one community
    /// - a node or edge carries a non-scalar attribute
    pub fn load<N, E>(nodes: N, edges: E) -> Result<Self>
    where
        N: IntoIterator<Item = Node>,
        E: IntoIterator<Item = Edge>,
    {
        let mut graph: DiGraph<Node, Edge> = DiGraph::new();
        let mut node_indices = HashMap::new();

        for node in nodes {
            check_scalar_attributes(&format!("node '{}'", node.id), &node.attributes)?;
            if let Some(&existing) = node_indices.get(&node.id) {
                let existing: &Node = &graph[existing];
                return Err(Error::integrity(format!(
                    "duplicate node id '{}' ({} and {})",
                    node.id, existing.kind, node.kind
                )));
            }
            let id = node.id.clone();
            let idx = graph.add_node(node);
            node_indices.insert(id, idx);
        }

        let mut incident = vec![Vec::new(); graph.node_count()];
        let mut memberships: HashMap<NodeIndex, NodeIndex> = HashMap::new();

        for (position, edge) in edges.into_iter().enumerate() {
            let source = resolve_endpoint(&node_indices, &edge, &edge.source_id, position)?;
            let target = resolve_endpoint(&node_indices, &edge, &edge.target_id, position)?;
            check_scalar_attributes(&format!("edge {}", edge.describe()), &edge.attributes)?;

            if edge.relation == Relation::BelongsTo {
                if graph[target].kind != NodeKind::Community {
                    return Err(Error::integrity(format!(
                        "edge {} targets a {}, expected a Community",
                        edge.describe(),
                        graph[target].kind
                    )));
                }
                if graph[source].is_article() {
                    if let Some(&previous) = memberships.get(&source) {
                        return Err(Error::integrity(format!(
                            "article '{}' belongs to both '{}' and '{}'",
                            edge.source_id, graph[previous].id, edge.target_id
                        )));
                    }
                    memberships.insert(source, target);
                }
            }

            let edge_idx = graph.add_edge(source, target, edge);
            incident[source.index()].push(edge_idx);
            if source != target {
                incident[target.index()].push(edge_idx);
            }
        }

        info!(
            "Loaded graph store: {} nodes, {} edges, {} community memberships",
            graph.node_count(),
            graph.edge_count(),
            memberships.len()
        );

        Ok(Self {
            graph,
            node_indices,
            incident,
            memberships,
        })
    }

    /// An empty store.
    pub fn empty() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether the store has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Get a node by id, or [`Error::NotFound`].
    pub fn get_node(&self, id: &str) -> Result<&Node> {
        self.index_of(id).map(|idx| &self.graph[idx])
    }

    /// Get a node by id, if it exists.
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.node_indices.get(id).map(|&idx| &self.graph[idx])
    }

    /// All nodes in load order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// All edges in load order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    /// All nodes of one kind, in load order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.graph.node_weights().filter(move |node| node.kind == kind)
    }

    // ------------------------------------------------------------------------
    // Adjacency
    // ------------------------------------------------------------------------

    /// Nodes adjacent to `id` over `relation` in the given direction.
    ///
    /// Results follow edge load order. A node with no matching edges yields
    /// an empty list; an unknown id is [`Error::NotFound`].
    pub fn neighbors(
        &self,
        id: &str,
        relation: Relation,
        direction: Direction,
    ) -> Result<Vec<&Node>> {
        let idx = self.index_of(id)?;
        Ok(self
            .incident_edges(idx, direction)
            .filter(|(_, _, edge)| edge.relation == relation)
            .map(|(_, other, _)| &self.graph[other])
            .collect())
    }

    /// Number of edges touching `id`, optionally restricted to one relation.
    pub fn degree(&self, id: &str, relation: Option<Relation>) -> Result<usize> {
        let idx = self.index_of(id)?;
        Ok(self
            .incident_edges(idx, Direction::Both)
            .filter(|(_, _, edge)| relation.is_none_or(|r| edge.relation == r))
            .count())
    }

    /// The community an article belongs to, if any.
    pub fn community_of(&self, article_id: &str) -> Result<Option<&Node>> {
        let idx = self.index_of(article_id)?;
        Ok(self.memberships.get(&idx).map(|&c| &self.graph[c]))
    }

    /// Articles that belong to a community, in load order.
    pub fn members_of(&self, community_id: &str) -> Result<Vec<&Node>> {
        let idx = self.community_index(community_id)?;
        Ok(self
            .member_indices(idx)
            .map(|member| &self.graph[member])
            .collect())
    }

    // ------------------------------------------------------------------------
    // Crate-internal index access
    // ------------------------------------------------------------------------

    pub(crate) fn index_of(&self, id: &str) -> Result<NodeIndex> {
        self.node_indices
            .get(id)
            .copied()
            .ok_or_else(|| Error::node_not_found(id))
    }

    /// Resolve a community id; any other kind is reported as not found.
    pub(crate) fn community_index(&self, id: &str) -> Result<NodeIndex> {
        let idx = self.index_of(id)?;
        if self.graph[idx].kind != NodeKind::Community {
            return Err(Error::not_found(format!("community '{id}'")));
        }
        Ok(idx)
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    pub(crate) fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        self.graph.node_indices()
    }

    pub(crate) fn edge_endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(edge)
    }

    /// Incident edges of `idx` as `(edge, other endpoint, weight)`, in load
    /// order. A self-loop is reported once.
    pub(crate) fn incident_edges(
        &self,
        idx: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &Edge)> + '_ {
        self.incident[idx.index()].iter().filter_map(move |&edge_idx| {
            let (source, target) = self.graph.edge_endpoints(edge_idx)?;
            let edge = &self.graph[edge_idx];
            if source == idx && direction.includes_out() {
                Some((edge_idx, target, edge))
            } else if target == idx && direction.includes_in() {
                Some((edge_idx, source, edge))
            } else {
                None
            }
        })
    }

    /// Citation neighbours (`REFERS_TO` / `LINKS_TO`, either direction).
    pub(crate) fn citation_neighbors(
        &self,
        idx: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.incident_edges(idx, direction)
            .filter(|(_, _, edge)| edge.relation.is_citation())
            .map(|(_, other, _)| other)
    }

    /// Citation edges touching `idx`, both directions.
    pub(crate) fn citation_degree(&self, idx: NodeIndex) -> usize {
        self.citation_neighbors(idx, Direction::Both).count()
    }

    pub(crate) fn community_index_of(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.memberships.get(&idx).copied()
    }

    pub(crate) fn member_indices(
        &self,
        community: NodeIndex,
    ) -> impl Iterator<Item = NodeIndex> + '_ {
        self.incident_edges(community, Direction::In)
            .filter(|(_, _, edge)| edge.relation == Relation::BelongsTo)
            .map(|(_, member, _)| member)
            .filter(|&member| self.graph[member].is_article())
    }
}

fn resolve_endpoint(
    indices: &HashMap<String, NodeIndex>,
    edge: &Edge,
    endpoint: &str,
    position: usize,
) -> Result<NodeIndex> {
    indices.get(endpoint).copied().ok_or_else(|| {
        debug!("Rejecting edge #{position}: {}", edge.describe());
        Error::integrity(format!(
            "edge #{position} {} references missing node '{endpoint}'",
            edge.describe()
        ))
    })
}

fn check_scalar_attributes(owner: &str, attributes: &Attributes) -> Result<()> {
    for (key, value) in attributes {
        if matches!(value, Value::Array(_) | Value::Object(_)) {
            return Err(Error::integrity(format!(
                "{owner} has non-scalar attribute '{key}'"
            )));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_store;

    #[test]
    fn test_load_sample() {
        let store = sample_store();
        assert_eq!(store.node_count(), 10);
        assert!(store.contains("A1"));
        assert!(!store.contains("A99"));
        assert_eq!(store.get_node("C1").unwrap().kind, NodeKind::Community);
    }

    #[test]
    fn test_get_node_missing() {
        let store = sample_store();
        let err = store.get_node("nope").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let nodes = vec![Node::article("x"), Node::community("x")];
        let err = GraphStore::load(nodes, vec![]).unwrap_err();
        assert!(matches!(err, Error::Integrity(_)));
        assert!(err.to_string().contains("duplicate node id 'x'"));
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let nodes = vec![Node::article("a")];
        let err = GraphStore::load(nodes, vec![Edge::refers_to("a", "ghost")]).unwrap_err();
        assert!(matches!(err, Error::Integrity(_)));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_multiple_memberships_rejected() {
        let nodes = vec![
            Node::article("a"),
            Node::community("c1"),
            Node::community("c2"),
        ];
        let edges = vec![Edge::belongs_to("a", "c1"), Edge::belongs_to("a", "c2")];
        let err = GraphStore::load(nodes, edges).unwrap_err();
        assert!(matches!(err, Error::Integrity(_)));
    }

    #[test]
    fn test_belongs_to_non_community_rejected() {
        let nodes = vec![Node::article("a"), Node::article("b")];
        let err = GraphStore::load(nodes, vec![Edge::belongs_to("a", "b")]).unwrap_err();
        assert!(err.to_string().contains("expected a Community"));
    }

    #[test]
    fn test_non_scalar_attribute_rejected() {
        let node = Node::article("a").with_attribute("tags", serde_json::json!(["x", "y"]));
        let err = GraphStore::load(vec![node], vec![]).unwrap_err();
        assert!(matches!(err, Error::Integrity(_)));
    }

    #[test]
    fn test_neighbors_follow_load_order() {
        let store = sample_store();
        let out: Vec<_> = store
            .neighbors("A1", Relation::RefersTo, Direction::Out)
            .unwrap()
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(out, vec!["A2", "A5"]);

        let citing_a2: Vec<_> = store
            .neighbors("A2", Relation::RefersTo, Direction::In)
            .unwrap()
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(citing_a2, vec!["A1", "A6"]);
    }

    #[test]
    fn test_neighbors_empty_is_not_error() {
        let store = sample_store();
        let none = store.neighbors("A4", Relation::HasTopic, Direction::Out).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_degree() {
        let store = sample_store();
        // A1: REFERS_TO A2, A5, HAS_TOPIC T1, BELONGS_TO C1, AUTHORED by U1
        assert_eq!(store.degree("A1", None).unwrap(), 5);
        assert_eq!(store.degree("A1", Some(Relation::RefersTo)).unwrap(), 2);
        assert!(store.degree("missing", None).is_err());
    }

    #[test]
    fn test_nodes_of_kind() {
        let store = sample_store();
        assert_eq!(store.nodes_of_kind(NodeKind::Article).count(), 6);
        assert_eq!(store.nodes_of_kind(NodeKind::Community).count(), 2);
        assert_eq!(store.nodes_of_kind(NodeKind::Tag).count(), 0);
    }

    #[test]
    fn test_community_membership() {
        let store = sample_store();
        assert_eq!(store.community_of("A1").unwrap().unwrap().id, "C1");
        assert!(store.community_of("T1").unwrap().is_none());

        let members: Vec<_> = store
            .members_of("C2")
            .unwrap()
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(members, vec!["A4", "A5", "A6"]);
    }

    #[test]
    fn test_members_of_non_community() {
        let store = sample_store();
        assert!(matches!(store.members_of("A1"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_self_loop_reported_once() {
        let store =
            GraphStore::load(vec![Node::article("a")], vec![Edge::refers_to("a", "a")]).unwrap();
        assert_eq!(store.degree("a", None).unwrap(), 1);
        let both = store.neighbors("a", Relation::RefersTo, Direction::Both).unwrap();
        assert_eq!(both.len(), 1);
    }

    #[test]
    fn test_empty_store() {
        let store = GraphStore::empty();
        assert!(store.is_empty());
        assert_eq!(store.edge_count(), 0);
    }
}
