//! Graph storage and query engines for Wikigraph.
//!
//! The store is built once from node and edge collections and never mutated,
//! so every engine below is a pure function over `&GraphStore` and any number
//! of queries may run in parallel.
//!
//! # Modules
//!
//! - [`types`]: `Node`, `Edge`, `NodeKind`, `Relation`, `Direction`
//! - [`store`]: `GraphStore` with integrity-checked loading
//! - [`pathfinding`]: bounded BFS shortest path
//! - [`recommend`]: community / references / hybrid recommendations
//! - [`analytics`]: counts, hubs and community summaries
//! - [`similarity`], [`pagerank`], [`subgraph`], [`lookup`]
//! - [`persistence`]: JSON documents
//! - [`validation`]: soft structural checks

#![doc = include_str!("../README.md")]

pub mod analytics;
pub mod context;
pub mod lookup;
pub mod pagerank;
pub mod pathfinding;
pub mod persistence;
pub mod recommend;
pub mod similarity;
pub mod store;
pub mod subgraph;
pub mod types;
pub mod validation;
pub mod views;

#[cfg(test)]
mod test_fixtures;

pub use analytics::{
    AnalyticsReport, CommunityStats, CommunitySummary, Hub, community_stats, compute_analytics,
};
pub use context::QueryContext;
pub use lookup::{relationships, search};
pub use pagerank::{PageRankEntry, PageRankReport, pagerank};
pub use pathfinding::{PathResult, shortest_path};
pub use persistence::{
    GraphMetadata, SerializableGraph, load_store, load_store_from_str, save_store,
};
pub use recommend::{Reason, Recommendation, RecommendationWeights, Strategy, recommend};
pub use similarity::{SimilarArticle, similar_articles};
pub use store::GraphStore;
pub use subgraph::{SubgraphEdge, SubgraphExport, export_subgraph};
pub use types::{Attributes, Direction, Edge, Node, NodeKind, Relation};
pub use validation::{ValidationIssue, ValidationReport, validate_store};
pub use views::{EdgeView, NodeView};
