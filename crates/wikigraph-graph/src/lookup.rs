//! Entity relationships and title search.

use crate::store::GraphStore;
use crate::types::Direction;
use crate::views::{EdgeView, NodeView};
use wikigraph_core::{Error, Result};

/// Largest accepted search limit.
pub const MAX_SEARCH_LIMIT: usize = 100;

/// All edges touching `id` in the given direction, in load order.
pub fn relationships(store: &GraphStore, id: &str, direction: Direction) -> Result<Vec<EdgeView>> {
    let idx = store.index_of(id)?;
    Ok(store
        .incident_edges(idx, direction)
        .map(|(_, _, edge)| EdgeView::from(edge))
        .collect())
}

/// Nodes whose `title` or `name` contains `term`, case-insensitively.
///
/// Results are ordered by id and capped at `limit` (1..=100).
pub fn search(store: &GraphStore, term: &str, limit: usize) -> Result<Vec<NodeView>> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Err(Error::invalid_argument("search term must not be empty"));
    }
    if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
        return Err(Error::invalid_argument(format!(
            "limit must be between 1 and {MAX_SEARCH_LIMIT}, got {limit}"
        )));
    }

    let mut matches: Vec<NodeView> = store
        .nodes()
        .filter(|node| {
            ["title", "name"].iter().any(|key| {
                node.attribute(key)
                    .and_then(|value| value.as_str())
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
        })
        .map(NodeView::from)
        .collect();

    matches.sort_by(|a, b| a.id.cmp(&b.id));
    matches.truncate(limit);
    Ok(matches)
}
