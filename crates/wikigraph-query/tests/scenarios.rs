//! End-to-end scenarios through the facade.

use std::sync::Arc;
use std::thread;
use tempfile::TempDir;
use wikigraph_graph::{
    Edge, GraphStore, Node, Strategy, load_store, load_store_from_str, save_store,
};
use wikigraph_query::{
    AnalyticsRequest, ErrorResponse, PathRequest, QueryConfig, QueryFacade, RecommendationRequest,
    SubgraphRequest,
};

/// A1-A2-A3 chained by LINKS_TO, A4 and A5 isolated; A1, A2 in C1, A3 in C2.
fn create_chain_facade() -> QueryFacade {
    let nodes = vec![
        Node::article("A1"),
        Node::article("A2"),
        Node::article("A3"),
        Node::article("A4"),
        Node::article("A5"),
        Node::community("C1"),
        Node::community("C2"),
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
fn chain_path_is_found() {
    let facade = create_chain_facade();
    let result = facade
        .shortest_path(&PathRequest::new("A1", "A3").with_max_depth(5))
        .unwrap();
    assert!(result.found);
    assert_eq!(result.path, vec!["A1", "A2", "A3"]);
    assert_eq!(result.hops, 2);
}

#[test]
fn isolated_article_has_no_path() {
    let facade = create_chain_facade();
    let result = facade
        .shortest_path(&PathRequest::new("A1", "A4").with_max_depth(5))
        .unwrap();
    assert!(!result.found);
    assert!(result.path.is_empty());
}

#[test]
fn community_recommendation_includes_peer_only() {
    let facade = create_chain_facade();
    let response = facade
        .recommend(
            &RecommendationRequest::new("A1")
                .with_limit(10)
                .with_strategy("community"),
        )
        .unwrap();
    let ids: Vec<_> = response.recommendations.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["A2"]);
    assert_eq!(response.recommendations[0].score, 1.0);
    assert_eq!(response.strategy, Strategy::Community);
}

#[test]
fn dangling_edge_document_is_rejected() {
    let json = r#"{
        "nodes": [{"id": "A1", "kind": "Article"}],
        "edges": [{"source_id": "A1", "target_id": "A9", "relation": "LINKS_TO"}]
    }"#;
    let err = load_store_from_str(json).unwrap_err();
    let body = ErrorResponse::from(&err);
    assert_eq!(body.error, "INTEGRITY_ERROR");
    assert_eq!(body.status, 500);
}

#[test]
fn error_codes_are_distinct() {
    let facade = create_chain_facade();
    let not_found = facade.shortest_path(&PathRequest::new("A1", "Z1")).unwrap_err();
    let strategy = facade
        .recommend(&RecommendationRequest::new("A1").with_strategy("random"))
        .unwrap_err();
    let argument = facade
        .analytics(&AnalyticsRequest { top_n: Some(-1) })
        .unwrap_err();

    let codes: Vec<_> = [&not_found, &strategy, &argument]
        .iter()
        .map(|err| ErrorResponse::from(*err))
        .map(|body| (body.error, body.status))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("NOT_FOUND".to_string(), 404),
            ("INVALID_STRATEGY".to_string(), 400),
            ("INVALID_ARGUMENT".to_string(), 400),
        ]
    );
}

#[test]
fn saved_graph_reloads_and_answers_queries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.json");
    let original = create_chain_facade();
    save_store(original.store(), &path, None).unwrap();

    let reloaded = QueryFacade::new(load_store(&path).unwrap(), QueryConfig::default()).unwrap();
    assert_eq!(reloaded.summary(), original.summary());

    let result = reloaded.shortest_path(&PathRequest::new("A1", "A3")).unwrap();
    assert_eq!(result.path, vec!["A1", "A2", "A3"]);
    let response = reloaded
        .recommend(&RecommendationRequest::new("A1").with_strategy("community"))
        .unwrap();
    assert_eq!(response.recommendations[0].id, "A2");
}

#[test]
fn missing_graph_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = load_store(dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.code(), "IO_ERROR");
}

#[test]
fn subgraph_through_facade() {
    let facade = create_chain_facade();
    let export = facade
        .export_subgraph(&SubgraphRequest {
            community_id: "C1".into(),
            include_cross_edges: true,
        })
        .unwrap();
    assert_eq!(export.node_count, 2);
    assert_eq!(export.edge_count, 2);
    assert_eq!(export.edges[1].other_community.as_deref(), Some("C2"));
}

#[test]
fn concurrent_queries_share_one_store() {
    let facade = create_chain_facade();
    let store: Arc<GraphStore> = facade.shared_store();

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let facade = facade.clone();
                scope.spawn(move || {
                    if i % 2 == 0 {
                        facade
                            .shortest_path(&PathRequest::new("A1", "A3"))
                            .map(|r| r.hops)
                    } else {
                        facade
                            .recommend(&RecommendationRequest::new("A2").with_strategy("hybrid"))
                            .map(|r| r.count)
                    }
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let value = handle.join().unwrap().unwrap();
            let expected = if i % 2 == 0 { 2 } else { 1 };
            assert_eq!(value, expected);
        }
    });

    assert_eq!(store.node_count(), 7);
}
