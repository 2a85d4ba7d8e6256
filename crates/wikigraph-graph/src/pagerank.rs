//! PageRank over the directed citation graph of articles.

use crate::context::QueryContext;
use crate::store::GraphStore;
use crate::types::Direction;
use log::debug;
use petgraph::algo::page_rank;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wikigraph_core::{Error, Result};

/// Default iteration count.
pub const DEFAULT_ITERATIONS: usize = 20;

/// Default damping factor.
pub const DEFAULT_DAMPING: f64 = 0.85;

/// One ranked article.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageRankEntry {
    /// 1-based position.
    pub rank: usize,
    /// Article id.
    pub id: String,
    /// Article title, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// PageRank score.
    pub score: f64,
}

/// PageRank output with the parameters that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageRankReport {
    /// Articles in the projection.
    pub total_nodes: usize,
    /// Iterations run.
    pub iterations: usize,
    /// Damping factor used.
    pub damping_factor: f64,
    /// Top entries, descending by score then ascending id.
    pub results: Vec<PageRankEntry>,
}

/// Rank articles by PageRank over `REFERS_TO` / `LINKS_TO` edges.
///
/// # Errors
///
/// [`Error::InvalidArgument`] unless `max_iterations >= 1`,
/// `0 < damping_factor <= 1` and `limit >= 1`.
pub fn pagerank(
    store: &GraphStore,
    max_iterations: usize,
    damping_factor: f64,
    limit: usize,
    ctx: &QueryContext,
) -> Result<PageRankReport> {
    if max_iterations == 0 {
        return Err(Error::invalid_argument("max_iterations must be at least 1"));
    }
    if !(damping_factor > 0.0 && damping_factor <= 1.0) {
        return Err(Error::invalid_argument(format!(
            "damping_factor must be in (0, 1], got {damping_factor}"
        )));
    }
    if limit == 0 {
        return Err(Error::invalid_argument("limit must be at least 1"));
    }

    // Article-only projection; weights are store indices.
    let mut projection: DiGraph<NodeIndex, ()> = DiGraph::new();
    let mut positions: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    for idx in store.node_indices() {
        if store.node_at(idx).is_article() {
            positions.insert(idx, projection.add_node(idx));
        }
    }
    for proj_idx in projection.node_indices() {
        let store_idx = projection[proj_idx];
        for target in store.citation_neighbors(store_idx, Direction::Out) {
            if let Some(&proj_target) = positions.get(&target) {
                projection.add_edge(proj_idx, proj_target, ());
            }
        }
    }

    let total_nodes = projection.node_count();
    if total_nodes == 0 {
        return Ok(PageRankReport {
            total_nodes,
            iterations: max_iterations,
            damping_factor,
            results: Vec::new(),
        });
    }

    ctx.check("pagerank")?;
    let scores = page_rank(&projection, damping_factor, max_iterations);
    ctx.check("pagerank")?;

    let mut ranked: Vec<(String, Option<String>, f64)> = projection
        .node_indices()
        .map(|proj_idx| {
            let node = store.node_at(projection[proj_idx]);
            (
                node.id.clone(),
                node.title().map(str::to_string),
                scores[proj_idx.index()],
            )
        })
        .collect();
    ranked.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);

    debug!(
        "PageRank over {total_nodes} articles ({max_iterations} iterations, d={damping_factor})"
    );

    Ok(PageRankReport {
        total_nodes,
        iterations: max_iterations,
        damping_factor,
        results: ranked
            .into_iter()
            .enumerate()
            .map(|(position, (id, title, score))| PageRankEntry {
                rank: position + 1,
                id,
                title,
                score,
            })
            .collect(),
    })
}
