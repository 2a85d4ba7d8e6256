//! Bounded shortest-path search over citation links.
//!
//! `REFERS_TO` and `LINKS_TO` edges are traversed in both directions.
//! The search expands one frontier per hop and stops at `max_depth`, so
//! cost is bounded by the neighbourhood within that radius rather than the
//! whole graph.

use crate::context::QueryContext;
use crate::store::GraphStore;
use crate::types::Direction;
use log::debug;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use wikigraph_core::{Error, Result};

/// Default search radius.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Outcome of a shortest-path query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// Whether a path within the depth bound exists.
    pub found: bool,
    /// Node ids from source to target, inclusive. Empty when not found.
    pub path: Vec<String>,
    /// Number of edges on the path (`path.len() - 1`), 0 when not found.
    pub hops: usize,
}

impl PathResult {
    /// No path within the bound.
    pub fn not_found() -> Self {
        Self {
            found: false,
            path: Vec::new(),
            hops: 0,
        }
    }

    fn from_path(path: Vec<String>) -> Self {
        Self {
            found: true,
            hops: path.len().saturating_sub(1),
            path,
        }
    }
}

/// Find a shortest citation path between two nodes within `max_depth` hops.
///
/// Ties between equal-length paths resolve to the one discovered first when
/// neighbours are expanded in edge load order, so repeated calls on the same
/// store return the same path.
///
/// # Errors
///
/// - [`Error::NotFound`] if either endpoint is missing
/// - [`Error::InvalidArgument`] if `max_depth` is 0 and the endpoints differ
/// - [`Error::Cancelled`] if the context expires mid-search
pub fn shortest_path(
    store: &GraphStore,
    source_id: &str,
    target_id: &str,
    max_depth: usize,
    ctx: &QueryContext,
) -> Result<PathResult> {
    let source = store.index_of(source_id)?;
    let target = store.index_of(target_id)?;

    if source == target {
        return Ok(PathResult::from_path(vec![source_id.to_string()]));
    }
    if max_depth == 0 {
        return Err(Error::invalid_argument("max_depth must be at least 1"));
    }

    let mut visited: HashSet<NodeIndex> = HashSet::from([source]);
    let mut parents: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut frontier = vec![source];

    for depth in 1..=max_depth {
        ctx.check("shortest path")?;

        let mut next = Vec::new();
        for &current in &frontier {
            for neighbor in store.citation_neighbors(current, Direction::Both) {
                if !visited.insert(neighbor) {
                    continue;
                }
                parents.insert(neighbor, current);
                if neighbor == target {
                    debug!("Path {source_id} -> {target_id} found at depth {depth}");
                    return Ok(PathResult::from_path(reconstruct(store, &parents, target)));
                }
                next.push(neighbor);
            }
        }

        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    debug!(
        "No path {source_id} -> {target_id} within {max_depth} hops ({} nodes visited)",
        visited.len()
    );
    Ok(PathResult::not_found())
}

fn reconstruct(
    store: &GraphStore,
    parents: &HashMap<NodeIndex, NodeIndex>,
    target: NodeIndex,
) -> Vec<String> {
    let mut path = vec![store.node_at(target).id.clone()];
    let mut current = target;
    while let Some(&parent) = parents.get(&current) {
        path.push(store.node_at(parent).id.clone());
        current = parent;
    }
    path.reverse();
    path
}

// ============================================================================
// Tests
// ============================================================================
