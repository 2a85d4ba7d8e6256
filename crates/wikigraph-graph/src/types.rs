//! Node, edge and relationship types.
//!
//! Nodes are identified by a string id that is unique across the whole
//! graph. Loaders that import numeric per-label ids (article 5, community 5)
//! are expected to namespace them before handing them over.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use wikigraph_core::{Error, Result};

/// Scalar attributes attached to nodes and edges.
pub type Attributes = BTreeMap<String, Value>;

// ============================================================================
// NodeKind
// ============================================================================

/// The label of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKind {
    /// A Wikipedia article.
    Article,
    /// A topic an article is about.
    Topic,
    /// An article author.
    Author,
    /// A free-form tag.
    Tag,
    /// A precomputed article cluster.
    Community,
}

impl NodeKind {
    /// All node kinds, in declaration order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Article,
        NodeKind::Topic,
        NodeKind::Author,
        NodeKind::Tag,
        NodeKind::Community,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Article => "Article",
            NodeKind::Topic => "Topic",
            NodeKind::Author => "Author",
            NodeKind::Tag => "Tag",
            NodeKind::Community => "Community",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_argument(format!("unknown node kind '{s}'")))
    }
}

// ============================================================================
// Relation
// ============================================================================

/// The type of a directed edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Relation {
    /// Article cites article.
    RefersTo,
    /// Article links to article.
    LinksTo,
    /// Article is about a topic.
    HasTopic,
    /// Author wrote an article.
    Authored,
    /// Node carries a tag.
    TaggedWith,
    /// Article is a member of a community.
    BelongsTo,
    /// Hierarchy between topics or communities.
    ParentOf,
}

impl Relation {
    /// All relations, in declaration order.
    pub const ALL: [Relation; 7] = [
        Relation::RefersTo,
        Relation::LinksTo,
        Relation::HasTopic,
        Relation::Authored,
        Relation::TaggedWith,
        Relation::BelongsTo,
        Relation::ParentOf,
    ];

    /// Wire name, e.g. `REFERS_TO`.
    pub fn name(&self) -> &'static str {
        match self {
            Relation::RefersTo => "REFERS_TO",
            Relation::LinksTo => "LINKS_TO",
            Relation::HasTopic => "HAS_TOPIC",
            Relation::Authored => "AUTHORED",
            Relation::TaggedWith => "TAGGED_WITH",
            Relation::BelongsTo => "BELONGS_TO",
            Relation::ParentOf => "PARENT_OF",
        }
    }

    /// Whether this is one of the article-to-article citation relations.
    ///
    /// `REFERS_TO` and `LINKS_TO` are interchangeable for traversal and
    /// scoring.
    pub fn is_citation(&self) -> bool {
        matches!(self, Relation::RefersTo | Relation::LinksTo)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Relation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Relation::ALL
            .into_iter()
            .find(|rel| rel.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_argument(format!("unknown relation '{s}'")))
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Which side of an edge a lookup follows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Edges leaving the node.
    Out,
    /// Edges entering the node.
    In,
    /// Either side.
    #[default]
    Both,
}

impl Direction {
    /// Whether an outgoing edge matches.
    pub fn includes_out(&self) -> bool {
        matches!(self, Direction::Out | Direction::Both)
    }

    /// Whether an incoming edge matches.
    pub fn includes_in(&self) -> bool {
        matches!(self, Direction::In | Direction::Both)
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "out" | "outgoing" => Ok(Direction::Out),
            "in" | "incoming" => Ok(Direction::In),
            "both" => Ok(Direction::Both),
            other => Err(Error::invalid_argument(format!(
                "direction must be 'out', 'in' or 'both', got '{other}'"
            ))),
        }
    }
}

// ============================================================================
// Node
// ============================================================================

/// A graph node. Immutable once loaded into a store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier.
    pub id: String,
    /// Node label.
    pub kind: NodeKind,
    /// Scalar attributes (title, traffic, size, density, ...).
    #[serde(default)]
    pub attributes: Attributes,
}

impl Node {
    /// Create a node with no attributes.
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            attributes: Attributes::new(),
        }
    }

    /// Create an article node.
    pub fn article(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Article)
    }

    /// Create a community node.
    pub fn community(id: impl Into<String>) -> Self {
        Self::new(id, NodeKind::Community)
    }

    /// Attach an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Attach a `title` attribute.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_attribute("title", title.into())
    }

    /// Look up an attribute.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Look up a numeric attribute.
    pub fn attribute_f64(&self, key: &str) -> Option<f64> {
        self.attribute(key).and_then(Value::as_f64)
    }

    /// Look up an attribute rendered as a string (numbers are stringified).
    pub fn attribute_string(&self, key: &str) -> Option<String> {
        match self.attribute(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Display title: the `title` attribute, else `name`.
    pub fn title(&self) -> Option<&str> {
        self.attribute("title")
            .or_else(|| self.attribute("name"))
            .and_then(Value::as_str)
    }

    /// Whether this node is an article.
    pub fn is_article(&self) -> bool {
        self.kind == NodeKind::Article
    }
}

// ============================================================================
// Edge
// ============================================================================

/// A directed, typed edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id.
    pub source_id: String,
    /// Target node id.
    pub target_id: String,
    /// Edge type.
    pub relation: Relation,
    /// Optional scalar attributes, e.g. `link_type`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl Edge {
    /// Create an edge with no attributes.
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relation: Relation,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation,
            attributes: Attributes::new(),
        }
    }

    /// Create a `REFERS_TO` edge.
    pub fn refers_to(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self::new(source_id, target_id, Relation::RefersTo)
    }

    /// Create a `LINKS_TO` edge.
    pub fn links_to(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self::new(source_id, target_id, Relation::LinksTo)
    }

    /// Create a `BELONGS_TO` edge from an article to its community.
    pub fn belongs_to(article_id: impl Into<String>, community_id: impl Into<String>) -> Self {
        Self::new(article_id, community_id, Relation::BelongsTo)
    }

    /// Attach an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// `source -[REL]-> target` description used in diagnostics.
    pub fn describe(&self) -> String {
        format!("{} -[{}]-> {}", self.source_id, self.relation, self.target_id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = Node::article("A1")
            .with_title("Graph theory")
            .with_attribute("traffic", 1200);

        assert_eq!(node.id, "A1");
        assert!(node.is_article());
        assert_eq!(node.title(), Some("Graph theory"));
        assert_eq!(node.attribute_f64("traffic"), Some(1200.0));
    }

    #[test]
    fn test_node_title_falls_back_to_name() {
        let node = Node::new("au-1", NodeKind::Author).with_attribute("name", "Ada");
        assert_eq!(node.title(), Some("Ada"));
    }

    #[test]
    fn test_attribute_string_stringifies_numbers() {
        let node = Node::community("C1").with_attribute("level", 2);
        assert_eq!(node.attribute_string("level"), Some("2".to_string()));
        assert_eq!(node.attribute_string("missing"), None);
    }

    #[test]
    fn test_relation_wire_names() {
        assert_eq!(Relation::RefersTo.name(), "REFERS_TO");
        assert_eq!(
            serde_json::to_string(&Relation::TaggedWith).unwrap(),
            "\"TAGGED_WITH\""
        );
        assert_eq!("belongs_to".parse::<Relation>().unwrap(), Relation::BelongsTo);
        assert!("CITES".parse::<Relation>().is_err());
    }

    #[test]
    fn test_citation_relations() {
        let citations: Vec<_> = Relation::ALL.iter().filter(|r| r.is_citation()).collect();
        assert_eq!(citations, vec![&Relation::RefersTo, &Relation::LinksTo]);
    }

    #[test]
    fn test_node_kind_parse() {
        assert_eq!("article".parse::<NodeKind>().unwrap(), NodeKind::Article);
        assert_eq!("Community".parse::<NodeKind>().unwrap(), NodeKind::Community);
        assert!("Page".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("out".parse::<Direction>().unwrap(), Direction::Out);
        assert_eq!("incoming".parse::<Direction>().unwrap(), Direction::In);
        assert_eq!("BOTH".parse::<Direction>().unwrap(), Direction::Both);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_edge_describe() {
        let edge = Edge::links_to("A1", "A2").with_attribute("link_type", "see_also");
        assert_eq!(edge.describe(), "A1 -[LINKS_TO]-> A2");
        assert_eq!(edge.attributes["link_type"], "see_also");
    }

    #[test]
    fn test_edge_without_attributes_omits_field() {
        let json = serde_json::to_string(&Edge::refers_to("a", "b")).unwrap();
        assert!(!json.contains("attributes"));
        let parsed: Edge = serde_json::from_str(&json).unwrap();
        assert!(parsed.attributes.is_empty());
    }
}
