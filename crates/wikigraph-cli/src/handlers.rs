//! Handlers for the graph commands.
//!
//! Each invocation loads the graph document named by the configuration,
//! wraps it in a [`QueryFacade`] and runs one command. Query results are
//! printed as pretty JSON on stdout.

use crate::cli::Command;
use crate::config::WikigraphConfig;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};
use wikigraph_core::traits::ConfigProvider;
use wikigraph_core::{Error, Result};
use wikigraph_graph::{ValidationIssue, load_store};
use wikigraph_query::{
    AnalyticsRequest, ErrorResponse, PageRankRequest, PathRequest, QueryFacade,
    RecommendationRequest, RelationshipsRequest, SearchRequest, SimilarityRequest,
    SubgraphRequest,
};

// ============================================================================
// Loading
// ============================================================================

/// Load the configured graph document and build a facade over it.
///
/// Parsing runs on the blocking pool.
pub async fn open_facade(config: &WikigraphConfig) -> Result<QueryFacade> {
    let path = config.graph_path()?;
    debug!("Loading graph from {}", path.display());

    let started = Instant::now();
    let load_path = path.clone();
    let store = tokio::task::spawn_blocking(move || load_store(&load_path))
        .await
        .map_err(|e| Error::operation(format!("graph load task failed: {e}")))??;
    info!(
        "Loaded {} in {:?}",
        path.display(),
        started.elapsed()
    );

    QueryFacade::new(store, config.query.clone())
}

// ============================================================================
// Handlers
// ============================================================================

/// Load the graph and print its sizes.
pub async fn handle_health(config: &WikigraphConfig) -> Result<()> {
    let facade = open_facade(config).await?;
    let summary = facade.summary();
    println!(
        "{}: healthy ({} nodes, {} edges, {} articles, {} communities)",
        config.project_name(),
        summary.node_count,
        summary.edge_count,
        summary.article_count,
        summary.community_count
    );
    Ok(())
}

/// Print the soft-issue report. Fails if the report has errors.
pub async fn handle_validate(config: &WikigraphConfig) -> Result<()> {
    let facade = open_facade(config).await?;
    let report = facade.validate();

    if report.valid {
        println!("Graph is valid.");
    } else {
        println!("Graph has validation issues:");
    }
    print_issues("ERROR", &report.errors);
    print_issues("WARN ", &report.warnings);
    print_issues("INFO ", &report.info);

    println!(
        "\nSummary: {} error(s), {} warning(s), {} note(s)",
        report.errors.len(),
        report.warnings.len(),
        report.info.len()
    );

    if report.valid {
        Ok(())
    } else {
        Err(Error::operation(format!(
            "Graph validation failed with {} error(s)",
            report.errors.len()
        )))
    }
}

/// Print node and edge counts.
pub async fn handle_stats(config: &WikigraphConfig) -> Result<()> {
    let facade = open_facade(config).await?;
    let summary = facade.summary();
    let report = facade.analytics(&AnalyticsRequest::default())?;

    println!("Graph Statistics");
    println!("================");
    println!("Nodes:          {}", summary.node_count);
    println!("Edges:          {}", summary.edge_count);
    println!("Articles:       {}", report.total_articles);
    println!("Communities:    {}", report.total_communities);
    println!("Citations:      {}", report.total_citation_edges);
    println!("Avg degree:     {:.2}", report.avg_degree);

    println!("\nNodes by kind:");
    for (kind, count) in &report.counts_by_kind {
        println!("  {}: {count}", kind.name());
    }
    println!("\nEdges by relation:");
    for (relation, count) in &report.counts_by_relation {
        println!("  {}: {count}", relation.name());
    }
    Ok(())
}

/// Run one query command and print its result.
pub async fn handle_query(config: &WikigraphConfig, command: &Command) -> Result<()> {
    let facade = open_facade(config).await?;
    let value = execute(&facade, command)?;
    print_json(&value)
}

/// Map a query command onto the facade.
pub fn execute(facade: &QueryFacade, command: &Command) -> Result<Value> {
    match command {
        Command::Path {
            from,
            to,
            max_depth,
        } => to_json(&facade.shortest_path(&PathRequest {
            source_id: from.clone(),
            target_id: to.clone(),
            max_depth: *max_depth,
        })?),
        Command::Recommend {
            id,
            limit,
            strategy,
        } => to_json(&facade.recommend(&RecommendationRequest {
            article_id: id.clone(),
            limit: *limit,
            strategy: strategy.clone(),
        })?),
        Command::Analytics { top_n } => {
            to_json(&facade.analytics(&AnalyticsRequest { top_n: *top_n })?)
        }
        Command::Similar { id, limit, cutoff } => {
            to_json(&facade.similar_articles(&SimilarityRequest {
                article_id: id.clone(),
                limit: *limit,
                similarity_cutoff: *cutoff,
            })?)
        }
        Command::Pagerank {
            iterations,
            damping,
            limit,
        } => to_json(&facade.pagerank(&PageRankRequest {
            max_iterations: *iterations,
            damping_factor: *damping,
            limit: *limit,
        })?),
        Command::Community { id } => to_json(&facade.community_stats(id)?),
        Command::Subgraph { id, cross_edges } => {
            to_json(&facade.export_subgraph(&SubgraphRequest {
                community_id: id.clone(),
                include_cross_edges: *cross_edges,
            })?)
        }
        Command::Node { id } => to_json(&facade.get_node(id)?),
        Command::Relationships { id, direction } => {
            to_json(&facade.relationships(&RelationshipsRequest {
                id: id.clone(),
                direction: direction.clone(),
            })?)
        }
        Command::Search { term, limit } => to_json(&facade.search(&SearchRequest {
            search_term: term.clone(),
            limit: *limit,
        })?),
        Command::Version
        | Command::Health
        | Command::Validate
        | Command::Stats
        | Command::Config(_) => Err(Error::invalid_argument(format!(
            "{command:?} is not a graph query"
        ))),
    }
}

// ============================================================================
// Output
// ============================================================================

/// Render a failure as the JSON error body.
pub fn error_body(err: &Error) -> String {
    let body = ErrorResponse::from(err);
    serde_json::to_string_pretty(&body).unwrap_or_else(|_| {
        format!(
            "{{\"error\": \"{}\", \"status\": {}}}",
            body.error, body.status
        )
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value)
        .map_err(|e| Error::operation(format!("Failed to serialize result: {e}")))
}

fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| Error::operation(format!("Failed to serialize result: {e}")))?;
    println!("{text}");
    Ok(())
}

fn print_issues(label: &str, issues: &[ValidationIssue]) {
    for issue in issues {
        println!("  {label} [{}]: {}", issue.code, issue.message);
        for node in &issue.nodes {
            println!("    - {node}");
        }
        for edge in &issue.edges {
            println!("    - {edge}");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
