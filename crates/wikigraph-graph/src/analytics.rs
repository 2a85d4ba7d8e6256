//! Graph-wide statistics and community summaries.
//!
//! Community structure is produced upstream; this module only reads the
//! `size`, `density`, `avg_degree`, `avg_traffic`, `median_traffic` and
//! `level` attributes stored on Community nodes and combines them with
//! membership counts from the store.

use crate::context::QueryContext;
use crate::store::GraphStore;
use crate::types::{Direction, Node, NodeKind, Relation};
use log::debug;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use wikigraph_core::{Error, Result};

// ============================================================================
// Types
// ============================================================================

/// Aggregate statistics for the whole graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Node count per kind; every kind is present.
    pub counts_by_kind: BTreeMap<NodeKind, usize>,
    /// Edge count per relation; every relation is present.
    pub counts_by_relation: BTreeMap<Relation, usize>,
    /// Number of Article nodes.
    pub total_articles: usize,
    /// Number of Community nodes.
    pub total_communities: usize,
    /// Number of `REFERS_TO` + `LINKS_TO` edges.
    pub total_citation_edges: usize,
    /// Mean citation degree over articles (0 when there are none).
    pub avg_degree: f64,
    /// Highest-degree articles, descending by degree then ascending id.
    pub hubs: Vec<Hub>,
    /// Largest communities, descending by size then ascending id.
    pub communities: Vec<CommunitySummary>,
}

/// A highly connected article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub {
    /// Article id.
    pub id: String,
    /// Citation degree (both directions).
    pub degree: usize,
    /// Community the article belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
}

/// Size and density of one community.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommunitySummary {
    /// Community id.
    pub id: String,
    /// Stored `size`, falling back to the member count.
    pub size: usize,
    /// Stored `density`.
    pub density: Option<f64>,
}

/// Detailed statistics for one community.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommunityStats {
    /// Community id.
    pub id: String,
    /// Stored `size`, falling back to the member count.
    pub size: usize,
    /// Stored network density.
    pub density: Option<f64>,
    /// Stored average degree.
    pub avg_degree: Option<f64>,
    /// Stored average traffic.
    pub avg_traffic: Option<f64>,
    /// Stored median traffic.
    pub median_traffic: Option<f64>,
    /// Stored hierarchy level.
    pub level: Option<String>,
    /// Articles with a `BELONGS_TO` edge to this community.
    pub article_count: usize,
    /// Distinct citation edges with both endpoints in the community.
    pub internal_edges: usize,
}

// ============================================================================
// Functions
// ============================================================================

/// Compute graph-wide analytics with the `top_n` hubs and communities.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `top_n` is 0; [`Error::Cancelled`] if the
/// context expires.
pub fn compute_analytics(
    store: &GraphStore,
    top_n: usize,
    ctx: &QueryContext,
) -> Result<AnalyticsReport> {
    if top_n == 0 {
        return Err(Error::invalid_argument("top_n must be at least 1"));
    }

    let mut counts_by_kind: BTreeMap<NodeKind, usize> =
        NodeKind::ALL.into_iter().map(|kind| (kind, 0)).collect();
    for node in store.nodes() {
        *counts_by_kind.entry(node.kind).or_default() += 1;
    }

    let mut counts_by_relation: BTreeMap<Relation, usize> =
        Relation::ALL.into_iter().map(|rel| (rel, 0)).collect();
    for edge in store.edges() {
        *counts_by_relation.entry(edge.relation).or_default() += 1;
    }

    ctx.check("analytics")?;

    let mut hubs: Vec<Hub> = store
        .node_indices()
        .filter(|&idx| store.node_at(idx).is_article())
        .map(|idx| Hub {
            id: store.node_at(idx).id.clone(),
            degree: store.citation_degree(idx),
            community_id: store
                .community_index_of(idx)
                .map(|c| store.node_at(c).id.clone()),
        })
        .collect();

    let total_articles = hubs.len();
    let degree_sum: usize = hubs.iter().map(|hub| hub.degree).sum();
    let avg_degree = if total_articles > 0 {
        degree_sum as f64 / total_articles as f64
    } else {
        0.0
    };

    hubs.sort_by(|a, b| b.degree.cmp(&a.degree).then_with(|| a.id.cmp(&b.id)));
    hubs.truncate(top_n);

    ctx.check("analytics")?;

    let mut communities: Vec<CommunitySummary> = store
        .node_indices()
        .filter(|&idx| store.node_at(idx).kind == NodeKind::Community)
        .map(|idx| {
            let node = store.node_at(idx);
            CommunitySummary {
                id: node.id.clone(),
                size: community_size(store, idx, node),
                density: node.attribute_f64("density"),
            }
        })
        .collect();
    let total_communities = communities.len();

    communities.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.id.cmp(&b.id)));
    communities.truncate(top_n);

    let total_citation_edges =
        counts_by_relation[&Relation::RefersTo] + counts_by_relation[&Relation::LinksTo];

    debug!(
        "Analytics: {} articles, {} communities, avg degree {:.2}",
        total_articles, total_communities, avg_degree
    );

    Ok(AnalyticsReport {
        counts_by_kind,
        counts_by_relation,
        total_articles,
        total_communities,
        total_citation_edges,
        avg_degree,
        hubs,
        communities,
    })
}

/// Statistics for a single community.
///
/// # Errors
///
/// [`Error::NotFound`] if the id is unknown or not a Community.
pub fn community_stats(store: &GraphStore, community_id: &str) -> Result<CommunityStats> {
    let idx = store.community_index(community_id)?;
    let node = store.node_at(idx);

    let members: HashSet<NodeIndex> = store.member_indices(idx).collect();
    let mut internal = HashSet::new();
    for &member in &members {
        for (edge_idx, other, edge) in store.incident_edges(member, Direction::Both) {
            if edge.relation.is_citation() && members.contains(&other) {
                internal.insert(edge_idx);
            }
        }
    }

    Ok(CommunityStats {
        id: node.id.clone(),
        size: community_size(store, idx, node),
        density: node.attribute_f64("density"),
        avg_degree: node.attribute_f64("avg_degree"),
        avg_traffic: node.attribute_f64("avg_traffic"),
        median_traffic: node.attribute_f64("median_traffic"),
        level: node.attribute_string("level"),
        article_count: members.len(),
        internal_edges: internal.len(),
    })
}

fn community_size(store: &GraphStore, idx: NodeIndex, node: &Node) -> usize {
    node.attribute("size")
        .and_then(Value::as_u64)
        .map(|size| size as usize)
        .unwrap_or_else(|| store.member_indices(idx).count())
}

// ============================================================================
// Tests
// ============================================================================
