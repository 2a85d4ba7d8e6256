//! Shared graph used by the unit tests.
//!
//! ```text
//!   C1: A1 A2 A3            C2: A4 A5 A6
//!
//!   A1 -> A2 -> A3 ~> A4    (-> REFERS_TO, ~> LINKS_TO)
//!   A1 -> A5 <- A6 -> A2
//!
//!   A1 HAS_TOPIC T1, U1 AUTHORED A1
//! ```

use crate::store::GraphStore;
use crate::types::{Edge, Node, NodeKind, Relation};

pub(crate) fn sample_nodes() -> Vec<Node> {
    vec![
        Node::article("A1").with_title("Graph theory").with_attribute("traffic", 1000),
        Node::article("A2").with_title("Breadth-first search").with_attribute("traffic", 500),
        Node::article("A3").with_title("Queue (abstract data type)").with_attribute("traffic", 200),
        Node::article("A4").with_title("Linked list").with_attribute("traffic", 300),
        Node::article("A5").with_title("Adjacency matrix").with_attribute("traffic", 150),
        Node::article("A6").with_title("Adjacency list").with_attribute("traffic", 100),
        Node::community("C1")
            .with_attribute("size", 3)
            .with_attribute("density", 0.67)
            .with_attribute("level", "1"),
        Node::community("C2"),
        Node::new("T1", NodeKind::Topic).with_attribute("name", "Graph algorithms"),
        Node::new("U1", NodeKind::Author).with_attribute("name", "Ada"),
    ]
}

pub(crate) fn sample_edges() -> Vec<Edge> {
    vec![
        Edge::refers_to("A1", "A2"),
        Edge::refers_to("A2", "A3"),
        Edge::links_to("A3", "A4"),
        Edge::refers_to("A1", "A5"),
        Edge::refers_to("A6", "A5"),
        Edge::refers_to("A6", "A2"),
        Edge::belongs_to("A1", "C1"),
        Edge::belongs_to("A2", "C1"),
        Edge::belongs_to("A3", "C1"),
        Edge::belongs_to("A4", "C2"),
        Edge::belongs_to("A5", "C2"),
        Edge::belongs_to("A6", "C2"),
        Edge::new("A1", "T1", Relation::HasTopic),
        Edge::new("U1", "A1", Relation::Authored),
    ]
}

pub(crate) fn sample_store() -> GraphStore {
    GraphStore::load(sample_nodes(), sample_edges()).expect("sample graph is consistent")
}
