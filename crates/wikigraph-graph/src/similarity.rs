//! Jaccard similarity over citation neighbourhoods.

use crate::context::QueryContext;
use crate::store::GraphStore;
use crate::types::Direction;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use wikigraph_core::{Error, Result};

/// Default minimum similarity.
pub const DEFAULT_CUTOFF: f64 = 0.1;

/// An article structurally similar to the source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarArticle {
    /// Article id.
    pub id: String,
    /// Article title, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Jaccard coefficient in [0, 1].
    pub similarity: f64,
    /// Size of the neighbourhood intersection.
    pub common_neighbors: usize,
}

/// Articles whose undirected citation neighbourhood overlaps the source's.
///
/// Candidates are two hops away: they share at least one neighbour with the
/// source and are neither the source nor one of its direct neighbours.
/// Entries below `cutoff` are dropped.
pub fn similar_articles(
    store: &GraphStore,
    article_id: &str,
    limit: usize,
    cutoff: f64,
    ctx: &QueryContext,
) -> Result<Vec<SimilarArticle>> {
    if limit == 0 {
        return Err(Error::invalid_argument("limit must be at least 1"));
    }
    if !(0.0..=1.0).contains(&cutoff) {
        return Err(Error::invalid_argument(format!(
            "similarity cutoff must be between 0 and 1, got {cutoff}"
        )));
    }

    let source = store.index_of(article_id)?;
    let source_neighbors = neighborhood(store, source);

    let mut seen = HashSet::new();
    let mut results = Vec::new();
    for &neighbor in &source_neighbors {
        ctx.check("similarity")?;
        for candidate in store.citation_neighbors(neighbor, Direction::Both) {
            if candidate == source
                || source_neighbors.contains(&candidate)
                || !store.node_at(candidate).is_article()
                || !seen.insert(candidate)
            {
                continue;
            }

            let candidate_neighbors = neighborhood(store, candidate);
            let common = source_neighbors.intersection(&candidate_neighbors).count();
            let union = source_neighbors.len() + candidate_neighbors.len() - common;
            let similarity = common as f64 / union as f64;

            if similarity >= cutoff {
                let node = store.node_at(candidate);
                results.push(SimilarArticle {
                    id: node.id.clone(),
                    title: node.title().map(str::to_string),
                    similarity,
                    common_neighbors: common,
                });
            }
        }
    }

    results.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.id.cmp(&b.id))
    });
    results.truncate(limit);
    Ok(results)
}

fn neighborhood(store: &GraphStore, idx: NodeIndex) -> HashSet<NodeIndex> {
    store
        .citation_neighbors(idx, Direction::Both)
        .filter(|&other| other != idx)
        .collect()
}
