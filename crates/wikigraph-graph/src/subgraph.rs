//! Community subgraph export.

use crate::store::GraphStore;
use crate::types::{Direction, Relation};
use crate::views::NodeView;
use petgraph::graph::EdgeIndex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use wikigraph_core::Result;

/// A community's articles and the citation edges around them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubgraphExport {
    /// Exported community.
    pub community_id: String,
    /// Member articles, ordered by id.
    pub nodes: Vec<NodeView>,
    /// Citation edges in load order.
    pub edges: Vec<SubgraphEdge>,
    /// `nodes.len()`.
    pub node_count: usize,
    /// `edges.len()`.
    pub edge_count: usize,
}

/// A citation edge within an export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgraphEdge {
    /// Source article id.
    pub source: String,
    /// Target article id.
    pub target: String,
    /// `REFERS_TO` or `LINKS_TO`.
    pub relation: Relation,
    /// Whether both endpoints are members.
    pub internal: bool,
    /// Community of the non-member endpoint, for cross edges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_community: Option<String>,
}

/// Export the members of a community and their citation edges.
///
/// With `include_cross_edges` false only edges between members are kept;
/// otherwise every citation edge touching a member is included once.
pub fn export_subgraph(
    store: &GraphStore,
    community_id: &str,
    include_cross_edges: bool,
) -> Result<SubgraphExport> {
    let community = store.community_index(community_id)?;
    let members: HashSet<_> = store.member_indices(community).collect();

    let mut nodes: Vec<NodeView> = members.iter().map(|&m| store.node_at(m).into()).collect();
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let mut selected: BTreeMap<EdgeIndex, SubgraphEdge> = BTreeMap::new();
    for &member in &members {
        for (edge_idx, other, edge) in store.incident_edges(member, Direction::Both) {
            if !edge.relation.is_citation() || selected.contains_key(&edge_idx) {
                continue;
            }
            let internal = members.contains(&other);
            if !internal && !include_cross_edges {
                continue;
            }
            let other_community = if internal {
                None
            } else {
                store
                    .community_index_of(other)
                    .map(|c| store.node_at(c).id.clone())
            };
            selected.insert(
                edge_idx,
                SubgraphEdge {
                    source: edge.source_id.clone(),
                    target: edge.target_id.clone(),
                    relation: edge.relation,
                    internal,
                    other_community,
                },
            );
        }
    }

    let edges: Vec<SubgraphEdge> = selected.into_values().collect();
    Ok(SubgraphExport {
        community_id: community_id.to_string(),
        node_count: nodes.len(),
        edge_count: edges.len(),
        nodes,
        edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::sample_store;
    use wikigraph_core::Error;

    fn pairs(export: &SubgraphExport) -> Vec<(&str, &str)> {
        export
            .edges
            .iter()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect()
    }

    #[test]
    fn test_internal_edges_only() {
        let export = export_subgraph(&sample_store(), "C1", false).unwrap();
        let ids: Vec<_> = export.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "A2", "A3"]);
        assert_eq!(pairs(&export), vec![("A1", "A2"), ("A2", "A3")]);
        assert!(export.edges.iter().all(|e| e.internal));
        assert_eq!(export.node_count, 3);
        assert_eq!(export.edge_count, 2);
    }

    #[test]
    fn test_with_cross_edges() {
        let export = export_subgraph(&sample_store(), "C1", true).unwrap();
        assert_eq!(
            pairs(&export),
            vec![("A1", "A2"), ("A2", "A3"), ("A3", "A4"), ("A1", "A5"), ("A6", "A2")]
        );
        let cross: Vec<_> = export.edges.iter().filter(|e| !e.internal).collect();
        assert_eq!(cross.len(), 3);
        assert!(cross.iter().all(|e| e.other_community.as_deref() == Some("C2")));
    }

    #[test]
    fn test_unknown_community() {
        let err = export_subgraph(&sample_store(), "C9", false).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
