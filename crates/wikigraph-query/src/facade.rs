//! The query facade.

use crate::config::QueryConfig;
use crate::requests::{
    AnalyticsRequest, PageRankRequest, PathRequest, RecommendationRequest, RelationshipsRequest,
    SearchRequest, SimilarityRequest, SubgraphRequest,
};
use crate::response::{
    GraphSummary, RecommendationResponse, RelationshipsResponse, SearchResponse, SimilarityResponse,
};
use log::{debug, warn};
use std::sync::Arc;
use wikigraph_core::{Error, Result};
use wikigraph_graph::lookup::MAX_SEARCH_LIMIT;
use wikigraph_graph::pagerank::{DEFAULT_DAMPING, DEFAULT_ITERATIONS};
use wikigraph_graph::similarity::DEFAULT_CUTOFF;
use wikigraph_graph::{
    AnalyticsReport, CommunityStats, Direction, GraphStore, NodeKind, NodeView, PageRankReport,
    PathResult, QueryContext, Strategy, SubgraphExport, ValidationReport,
};

/// Largest accepted PageRank iteration count.
pub const MAX_PAGERANK_ITERATIONS: usize = 100;

/// Validating front door to a loaded [`GraphStore`].
///
/// Cloning is cheap; clones share the store.
#[derive(Clone, Debug)]
pub struct QueryFacade {
    store: Arc<GraphStore>,
    config: Arc<QueryConfig>,
    context: Option<QueryContext>,
}

impl QueryFacade {
    /// Wrap a store with the given configuration.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the configuration is inconsistent.
    pub fn new(store: GraphStore, config: QueryConfig) -> Result<Self> {
        Self::from_arc(Arc::new(store), config)
    }

    /// Wrap an already shared store.
    pub fn from_arc(store: Arc<GraphStore>, config: QueryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config: Arc::new(config),
            context: None,
        })
    }

    /// A handle whose calls all run under `ctx`, so the caller can cancel
    /// them from another thread.
    pub fn with_context(&self, ctx: QueryContext) -> Self {
        Self {
            context: Some(ctx),
            ..self.clone()
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// A shared handle to the store.
    pub fn shared_store(&self) -> Arc<GraphStore> {
        Arc::clone(&self.store)
    }

    /// Active configuration.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// The context the next call will run under.
    pub fn context(&self) -> QueryContext {
        match (&self.context, self.config.timeout()) {
            (Some(ctx), _) => ctx.clone(),
            (None, Some(timeout)) => QueryContext::with_timeout(timeout),
            (None, None) => QueryContext::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Core queries
    // ------------------------------------------------------------------------

    /// Shortest citation path.
    pub fn shortest_path(&self, request: &PathRequest) -> Result<PathResult> {
        let max_depth = bounded(
            "max_depth",
            request.max_depth,
            self.config.default_max_depth,
            self.config.max_depth_limit,
        )?;
        self.run("shortest_path", |ctx| {
            wikigraph_graph::shortest_path(
                &self.store,
                &request.source_id,
                &request.target_id,
                max_depth,
                ctx,
            )
        })
    }

    /// Ranked related articles.
    pub fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResponse> {
        let strategy = match request.strategy.as_deref() {
            Some(name) => name.parse::<Strategy>()?,
            None => Strategy::default(),
        };
        let limit = bounded(
            "limit",
            request.limit,
            self.config.default_limit,
            self.config.max_limit,
        )?;
        let recommendations = self.run("recommend", |ctx| {
            wikigraph_graph::recommend(
                &self.store,
                &request.article_id,
                strategy,
                limit,
                &self.config.weights,
                ctx,
            )
        })?;
        Ok(RecommendationResponse {
            source_id: request.article_id.clone(),
            strategy,
            count: recommendations.len(),
            recommendations,
        })
    }

    /// Graph-wide analytics.
    pub fn analytics(&self, request: &AnalyticsRequest) -> Result<AnalyticsReport> {
        let top_n = bounded(
            "top_n",
            request.top_n,
            self.config.default_top_n,
            self.config.max_top_n,
        )?;
        self.run("analytics", |ctx| {
            wikigraph_graph::compute_analytics(&self.store, top_n, ctx)
        })
    }

    // ------------------------------------------------------------------------
    // Supplementary queries
    // ------------------------------------------------------------------------

    /// Jaccard-similar articles.
    pub fn similar_articles(&self, request: &SimilarityRequest) -> Result<SimilarityResponse> {
        let limit = bounded(
            "limit",
            request.limit,
            self.config.default_limit,
            self.config.max_limit,
        )?;
        let cutoff = request.similarity_cutoff.unwrap_or(DEFAULT_CUTOFF);
        let results = self.run("similar_articles", |ctx| {
            wikigraph_graph::similar_articles(&self.store, &request.article_id, limit, cutoff, ctx)
        })?;
        Ok(SimilarityResponse {
            source_id: request.article_id.clone(),
            similarity_cutoff: cutoff,
            count: results.len(),
            results,
        })
    }

    /// PageRank over citations.
    pub fn pagerank(&self, request: &PageRankRequest) -> Result<PageRankReport> {
        let iterations = bounded(
            "max_iterations",
            request.max_iterations,
            DEFAULT_ITERATIONS,
            MAX_PAGERANK_ITERATIONS,
        )?;
        let limit = bounded(
            "limit",
            request.limit,
            self.config.default_limit,
            self.config.max_limit,
        )?;
        let damping = request.damping_factor.unwrap_or(DEFAULT_DAMPING);
        self.run("pagerank", |ctx| {
            wikigraph_graph::pagerank(&self.store, iterations, damping, limit, ctx)
        })
    }

    /// Statistics for one community.
    pub fn community_stats(&self, community_id: &str) -> Result<CommunityStats> {
        self.run("community_stats", |_| {
            wikigraph_graph::community_stats(&self.store, community_id)
        })
    }

    /// Export a community's subgraph.
    pub fn export_subgraph(&self, request: &SubgraphRequest) -> Result<SubgraphExport> {
        self.run("export_subgraph", |_| {
            wikigraph_graph::export_subgraph(
                &self.store,
                &request.community_id,
                request.include_cross_edges,
            )
        })
    }

    /// Look up one node.
    pub fn get_node(&self, id: &str) -> Result<NodeView> {
        self.store.get_node(id).map(NodeView::from)
    }

    /// Edges of one node.
    pub fn relationships(&self, request: &RelationshipsRequest) -> Result<RelationshipsResponse> {
        let direction = match request.direction.as_deref() {
            Some(name) => name.parse::<Direction>()?,
            None => Direction::Both,
        };
        let relationships = wikigraph_graph::relationships(&self.store, &request.id, direction)?;
        Ok(RelationshipsResponse {
            id: request.id.clone(),
            direction,
            count: relationships.len(),
            relationships,
        })
    }

    /// Title / name search.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let limit = bounded(
            "limit",
            request.limit,
            self.config.default_limit,
            MAX_SEARCH_LIMIT,
        )?;
        let results = wikigraph_graph::search(&self.store, &request.search_term, limit)?;
        Ok(SearchResponse {
            search_term: request.search_term.clone(),
            count: results.len(),
            results,
        })
    }

    /// Soft structural checks.
    pub fn validate(&self) -> ValidationReport {
        wikigraph_graph::validate_store(&self.store)
    }

    /// Node and edge counts.
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            node_count: self.store.node_count(),
            edge_count: self.store.edge_count(),
            article_count: self.store.nodes_of_kind(NodeKind::Article).count(),
            community_count: self.store.nodes_of_kind(NodeKind::Community).count(),
        }
    }

    fn run<T>(&self, operation: &str, f: impl FnOnce(&QueryContext) -> Result<T>) -> Result<T> {
        let ctx = self.context();
        debug!("Running {operation}");
        let result = f(&ctx);
        match &result {
            Err(err @ Error::Cancelled(_)) => warn!("{operation} aborted: {err}"),
            Err(err) => debug!("{operation} failed: {err}"),
            Ok(_) => {}
        }
        result
    }
}

/// Apply a default and check `1 <= value <= max`.
fn bounded(name: &str, value: Option<i64>, default: usize, max: usize) -> Result<usize> {
    let Some(value) = value else {
        return Ok(default);
    };
    if value <= 0 {
        return Err(Error::invalid_argument(format!(
            "{name} must be positive, got {value}"
        )));
    }
    match usize::try_from(value) {
        Ok(value) if value <= max => Ok(value),
        _ => Err(Error::invalid_argument(format!(
            "{name} must be at most {max}, got {value}"
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wikigraph_graph::{Edge, Node, Reason};

    fn create_test_facade() -> QueryFacade {
        let nodes = vec![
            Node::article("A1").with_title("Alpha"),
            Node::article("A2").with_title("Beta"),
            Node::article("A3").with_title("Gamma"),
            Node::article("A4").with_title("Delta"),
            Node::community("C1").with_attribute("size", 2),
            Node::community("C2").with_attribute("size", 1),
        ];
        let edges = vec![
            Edge::links_to("A1", "A2"),
            Edge::links_to("A2", "A3"),
            Edge::belongs_to("A1", "C1"),
            Edge::belongs_to("A2", "C1"),
            Edge::belongs_to("A3", "C2"),
        ];
        QueryFacade::new(GraphStore::load(nodes, edges).unwrap(), QueryConfig::default()).unwrap()
    }

    #[test]
    fn test_bounded() {
        assert_eq!(bounded("limit", None, 10, 50).unwrap(), 10);
        assert_eq!(bounded("limit", Some(50), 10, 50).unwrap(), 50);
        assert!(matches!(bounded("limit", Some(0), 10, 50), Err(Error::InvalidArgument(_))));
        assert!(matches!(bounded("limit", Some(-3), 10, 50), Err(Error::InvalidArgument(_))));
        let err = bounded("limit", Some(51), 10, 50).unwrap_err();
        assert!(err.to_string().contains("at most 50"));
    }

    #[test]
    fn test_shortest_path_defaults_depth() {
        let facade = create_test_facade();
        let result = facade.shortest_path(&PathRequest::new("A1", "A3")).unwrap();
        assert_eq!(result.hops, 2);
    }

    #[test]
    fn test_shortest_path_rejects_depth_over_limit() {
        let facade = create_test_facade();
        let err = facade
            .shortest_path(&PathRequest::new("A1", "A3").with_max_depth(11))
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_recommend_default_strategy_is_community() {
        let facade = create_test_facade();
        let response = facade.recommend(&RecommendationRequest::new("A1")).unwrap();
        assert_eq!(response.strategy, Strategy::Community);
        assert_eq!(response.count, 1);
        assert_eq!(response.recommendations[0].id, "A2");
        assert_eq!(response.recommendations[0].reasons, vec![Reason::SameCommunity]);
    }

    #[test]
    fn test_recommend_unknown_strategy() {
        let facade = create_test_facade();
        let err = facade
            .recommend(&RecommendationRequest::new("A1").with_strategy("popular"))
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_STRATEGY");
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_analytics_top_n_bounds() {
        let facade = create_test_facade();
        let report = facade.analytics(&AnalyticsRequest { top_n: Some(1) }).unwrap();
        assert_eq!(report.hubs.len(), 1);
        assert_eq!(report.hubs[0].id, "A2");
        assert!(facade.analytics(&AnalyticsRequest { top_n: Some(0) }).is_err());
        assert!(facade.analytics(&AnalyticsRequest { top_n: Some(51) }).is_err());
    }

    #[test]
    fn test_cancelled_context_propagates() {
        let facade = create_test_facade();
        let ctx = QueryContext::new();
        ctx.cancel();
        let err = facade
            .with_context(ctx)
            .shortest_path(&PathRequest::new("A1", "A3"))
            .unwrap_err();
        assert_eq!(err.code(), "CANCELLED");
        assert_eq!(err.status_code(), 504);
    }

    #[test]
    fn test_expired_deadline_cancels() {
        let facade = create_test_facade();
        let err = facade
            .with_context(QueryContext::new().deadline(std::time::Instant::now()))
            .analytics(&AnalyticsRequest::default())
            .unwrap_err();
        assert_eq!(err.code(), "CANCELLED");
        assert_eq!(err.status_code(), 504);
    }

    #[test]
    fn test_configured_timeout_sets_deadline() {
        let config = QueryConfig {
            timeout_ms: Some(1),
            ..QueryConfig::default()
        };
        let facade = QueryFacade::from_arc(create_test_facade().shared_store(), config).unwrap();

        let ctx = facade.context();
        assert!(ctx.check("analytics").is_ok());
        std::thread::sleep(std::time::Duration::from_millis(20));
        let err = ctx.check("analytics").unwrap_err();
        assert_eq!(err.code(), "CANCELLED");
    }

    #[test]
    fn test_relationships_direction_parsing() {
        let facade = create_test_facade();
        let response = facade
            .relationships(&RelationshipsRequest {
                id: "A2".into(),
                direction: Some("incoming".into()),
            })
            .unwrap();
        assert_eq!(response.direction, Direction::In);
        assert_eq!(response.count, 1);
        assert_eq!(response.relationships[0].source, "A1");

        let err = facade
            .relationships(&RelationshipsRequest {
                id: "A2".into(),
                direction: Some("up".into()),
            })
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_search_limit_capped_at_100() {
        let facade = create_test_facade();
        let ok = facade.search(&SearchRequest {
            search_term: "a".into(),
            limit: Some(100),
        });
        assert!(ok.is_ok());
        let err = facade
            .search(&SearchRequest {
                search_term: "a".into(),
                limit: Some(101),
            })
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_get_node() {
        let facade = create_test_facade();
        assert_eq!(facade.get_node("A3").unwrap().kind, NodeKind::Article);
        assert_eq!(facade.get_node("nope").unwrap_err().status_code(), 404);
    }

    #[test]
    fn test_summary() {
        let summary = create_test_facade().summary();
        assert_eq!(summary.node_count, 6);
        assert_eq!(summary.edge_count, 5);
        assert_eq!(summary.article_count, 4);
        assert_eq!(summary.community_count, 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = QueryConfig {
            default_top_n: 0,
            ..QueryConfig::default()
        };
        let err = QueryFacade::new(GraphStore::empty(), config).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_pagerank_defaults() {
        let report = create_test_facade().pagerank(&PageRankRequest::default()).unwrap();
        assert_eq!(report.iterations, DEFAULT_ITERATIONS);
        assert_eq!(report.total_nodes, 4);
    }

    #[test]
    fn test_similar_articles_default_cutoff() {
        let response = create_test_facade()
            .similar_articles(&SimilarityRequest {
                article_id: "A1".into(),
                ..SimilarityRequest::default()
            })
            .unwrap();
        assert_eq!(response.similarity_cutoff, DEFAULT_CUTOFF);
        // A1 and A3 share A2.
        assert_eq!(response.results[0].id, "A3");
    }
}
