//! JSON persistence for graph stores.
//!
//! The on-disk document is `{ "nodes": [...], "edges": [...], "metadata": {...} }`.
//! Loading goes through [`GraphStore::load`], so a document with a dangling
//! edge or duplicate id is rejected as a whole.

use crate::store::GraphStore;
use crate::types::{Edge, Node};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use wikigraph_core::{Error, Result};

// ============================================================================
// Serializable types
// ============================================================================

/// Serializable representation of a graph store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializableGraph {
    /// All nodes in load order.
    pub nodes: Vec<Node>,
    /// All edges in load order.
    pub edges: Vec<Edge>,
    /// Optional provenance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GraphMetadata>,
}

/// Provenance of a persisted graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// When the graph was built (unix timestamp).
    pub built_at: String,
    /// Version of the builder.
    pub builder_version: String,
    /// Upstream data source, e.g. the ETL export name.
    #[serde(default)]
    pub source: Option<String>,
}

impl Default for GraphMetadata {
    fn default() -> Self {
        Self {
            built_at: timestamp_now(),
            builder_version: env!("CARGO_PKG_VERSION").to_string(),
            source: None,
        }
    }
}

impl GraphMetadata {
    /// Metadata stamped now, tagged with a source.
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }
}

fn timestamp_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    duration.as_secs().to_string()
}

// ============================================================================
// Save / Load
// ============================================================================

/// Write a store to a JSON file.
pub fn save_store(
    store: &GraphStore,
    path: impl AsRef<Path>,
    metadata: Option<GraphMetadata>,
) -> Result<()> {
    let document = SerializableGraph {
        nodes: store.nodes().cloned().collect(),
        edges: store.edges().cloned().collect(),
        metadata,
    };

    let json = serde_json::to_string_pretty(&document)
        .map_err(|e| Error::operation(format!("Failed to serialize graph: {e}")))?;

    std::fs::write(path.as_ref(), json).map_err(|e| Error::io_with_path(e, path.as_ref()))?;
    info!(
        "Saved graph to {} ({} nodes, {} edges)",
        path.as_ref().display(),
        document.nodes.len(),
        document.edges.len()
    );
    Ok(())
}

/// Load a store from a JSON file.
pub fn load_store(path: impl AsRef<Path>) -> Result<GraphStore> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    let json = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    load_store_from_str(&json)
}

/// Load a store from a JSON string.
pub fn load_store_from_str(json: &str) -> Result<GraphStore> {
    let (store, _) = load_document_from_str(json)?;
    Ok(store)
}

/// Load a store and return its metadata alongside.
pub fn load_document_from_str(json: &str) -> Result<(GraphStore, Option<GraphMetadata>)> {
    let document: SerializableGraph = serde_json::from_str(json)
        .map_err(|e| Error::parse(format!("Failed to parse graph JSON: {e}")))?;
    let store = GraphStore::load(document.nodes, document.edges)?;
    Ok((store, document.metadata))
}

// ============================================================================
// Tests
// ============================================================================
