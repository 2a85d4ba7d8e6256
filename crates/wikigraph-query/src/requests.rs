//! Request types accepted by the facade.
//!
//! Numeric fields are signed and optional so that a front end can pass
//! through whatever the caller sent; the facade applies defaults and rejects
//! non-positive or oversized values.

use serde::{Deserialize, Serialize};

/// Shortest path between two articles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathRequest {
    /// Start node.
    pub source_id: String,
    /// End node.
    pub target_id: String,
    /// Hop bound.
    #[serde(default)]
    pub max_depth: Option<i64>,
}

impl PathRequest {
    /// Request with the default depth.
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            max_depth: None,
        }
    }

    /// Set the hop bound.
    pub fn with_max_depth(mut self, max_depth: i64) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Related articles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Source article.
    pub article_id: String,
    /// Result cap.
    #[serde(default)]
    pub limit: Option<i64>,
    /// `community`, `references` or `hybrid`; defaults to `community`.
    #[serde(default)]
    pub strategy: Option<String>,
}

impl RecommendationRequest {
    /// Request with default limit and strategy.
    pub fn new(article_id: impl Into<String>) -> Self {
        Self {
            article_id: article_id.into(),
            ..Self::default()
        }
    }

    /// Set the result cap.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the strategy name.
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }
}

/// Graph-wide analytics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRequest {
    /// Number of hubs and communities to report.
    #[serde(default)]
    pub top_n: Option<i64>,
}

/// Jaccard-similar articles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityRequest {
    /// Source article.
    pub article_id: String,
    /// Result cap.
    #[serde(default)]
    pub limit: Option<i64>,
    /// Minimum similarity in [0, 1].
    #[serde(default)]
    pub similarity_cutoff: Option<f64>,
}

/// PageRank over citations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRankRequest {
    /// Iteration count.
    #[serde(default)]
    pub max_iterations: Option<i64>,
    /// Damping factor in (0, 1].
    #[serde(default)]
    pub damping_factor: Option<f64>,
    /// Result cap.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Community subgraph export.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SubgraphRequest {
    /// Community to export.
    pub community_id: String,
    /// Include edges leaving the community.
    #[serde(default)]
    pub include_cross_edges: bool,
}

/// Title / name search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Case-insensitive substring.
    pub search_term: String,
    /// Result cap (1..=100).
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Edges of one node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipsRequest {
    /// Node id.
    pub id: String,
    /// `out`, `in` or `both` (default).
    #[serde(default)]
    pub direction: Option<String>,
}
