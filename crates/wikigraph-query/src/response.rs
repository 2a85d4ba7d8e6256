//! Response envelopes returned by the facade.

use serde::{Deserialize, Serialize};
use wikigraph_core::Error;
use wikigraph_graph::{Direction, EdgeView, NodeView, Recommendation, SimilarArticle, Strategy};

/// Uniform failure body for external callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable code such as `NOT_FOUND`.
    pub error: String,
    /// Human-readable description.
    pub message: String,
    /// HTTP status an external layer should use.
    pub status: u16,
}

impl From<&Error> for ErrorResponse {
    fn from(err: &Error) -> Self {
        Self {
            error: err.code().to_string(),
            message: err.to_string(),
            status: err.status_code(),
        }
    }
}

impl From<Error> for ErrorResponse {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

/// Ranked recommendations for one article.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    /// Source article.
    pub source_id: String,
    /// Strategy used.
    pub strategy: Strategy,
    /// Ranked results.
    pub recommendations: Vec<Recommendation>,
    /// `recommendations.len()`.
    pub count: usize,
}

/// Similar articles for one source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResponse {
    /// Source article.
    pub source_id: String,
    /// Cutoff applied.
    pub similarity_cutoff: f64,
    /// Ranked results.
    pub results: Vec<SimilarArticle>,
    /// `results.len()`.
    pub count: usize,
}

/// A node with its edges.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelationshipsResponse {
    /// Node id.
    pub id: String,
    /// Direction followed.
    pub direction: Direction,
    /// Matching edges in load order.
    pub relationships: Vec<EdgeView>,
    /// `relationships.len()`.
    pub count: usize,
}

/// Search hits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Term as given.
    pub search_term: String,
    /// Matching nodes ordered by id.
    pub results: Vec<NodeView>,
    /// `results.len()`.
    pub count: usize,
}

/// Sizes of the loaded graph.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    /// All nodes.
    pub node_count: usize,
    /// All edges.
    pub edge_count: usize,
    /// Article nodes.
    pub article_count: usize,
    /// Community nodes.
    pub community_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_fields() {
        let body = ErrorResponse::from(Error::invalid_strategy("'popular'"));
        assert_eq!(body.error, "INVALID_STRATEGY");
        assert_eq!(body.status, 400);
        assert!(body.message.contains("popular"));
    }

    #[test]
    fn test_error_response_json() {
        let body = ErrorResponse::from(&Error::node_not_found("A9"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
        assert_eq!(json["status"], 404);
        assert_eq!(json["message"], "Not found: node 'A9'");
    }

    #[test]
    fn test_recommendation_response_shape() {
        let response = RecommendationResponse {
            source_id: "A1".into(),
            strategy: Strategy::Hybrid,
            recommendations: vec![],
            count: 0,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["strategy"], "hybrid");
        assert_eq!(json["count"], 0);
    }
}
