//! Soft validation of a loaded store.
//!
//! Load-time integrity failures are fatal and handled by
//! [`GraphStore::load`]. The checks here report structural oddities in a
//! store that loaded successfully:
//!
//! | Code                  | Severity | Meaning                              |
//! |-----------------------|----------|--------------------------------------|
//! | `ORPHAN_NODES`        | warning  | nodes with no edges at all           |
//! | `SELF_LOOPS`          | error    | edges from a node to itself          |
//! | `DUPLICATE_EDGES`     | warning  | same source, target and relation     |
//! | `UNASSIGNED_ARTICLES` | info     | articles without a community         |

use crate::store::GraphStore;
use crate::types::{Direction, NodeKind, Relation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ============================================================================
// Types
// ============================================================================

/// Outcome of [`validate_store`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// False once any error-level issue is recorded.
    pub valid: bool,
    /// Issues that should be fixed upstream.
    pub errors: Vec<ValidationIssue>,
    /// Suspicious but tolerated.
    pub warnings: Vec<ValidationIssue>,
    /// Informational findings.
    pub info: Vec<ValidationIssue>,
}

impl ValidationReport {
    fn new() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    fn add_error(&mut self, issue: ValidationIssue) {
        self.valid = false;
        self.errors.push(issue);
    }

    /// Errors plus warnings.
    pub fn total_issues(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

/// One coded finding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable issue code.
    pub code: String,
    /// Human-readable summary.
    pub message: String,
    /// Affected node ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,
    /// Affected edges as `source -[REL]-> target`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<String>,
}

impl ValidationIssue {
    fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

// ============================================================================
// Checks
// ============================================================================

/// Run every soft check against `store`.
pub fn validate_store(store: &GraphStore) -> ValidationReport {
    let mut report = ValidationReport::new();

    let orphans: Vec<String> = store
        .node_indices()
        .filter(|&idx| store.incident_edges(idx, Direction::Both).next().is_none())
        .map(|idx| store.node_at(idx).id.clone())
        .collect();
    if !orphans.is_empty() {
        let mut issue = ValidationIssue::new(
            "ORPHAN_NODES",
            format!("{} node(s) have no connections", orphans.len()),
        );
        issue.nodes = orphans;
        report.warnings.push(issue);
    }

    let self_loops: Vec<String> = store
        .edges()
        .filter(|edge| edge.source_id == edge.target_id)
        .map(|edge| edge.describe())
        .collect();
    if !self_loops.is_empty() {
        let mut issue = ValidationIssue::new(
            "SELF_LOOPS",
            format!("{} edge(s) are self-loops", self_loops.len()),
        );
        issue.edges = self_loops;
        report.add_error(issue);
    }

    let mut seen: HashSet<(&str, &str, Relation)> = HashSet::new();
    let duplicates: Vec<String> = store
        .edges()
        .filter(|edge| {
            !seen.insert((
                edge.source_id.as_str(),
                edge.target_id.as_str(),
                edge.relation,
            ))
        })
        .map(|edge| edge.describe())
        .collect();
    if !duplicates.is_empty() {
        let mut issue = ValidationIssue::new(
            "DUPLICATE_EDGES",
            format!("{} duplicate edge(s) found", duplicates.len()),
        );
        issue.edges = duplicates;
        report.warnings.push(issue);
    }

    let unassigned: Vec<String> = store
        .node_indices()
        .filter(|&idx| {
            store.node_at(idx).kind == NodeKind::Article && store.community_index_of(idx).is_none()
        })
        .map(|idx| store.node_at(idx).id.clone())
        .collect();
    if !unassigned.is_empty() {
        let mut issue = ValidationIssue::new(
            "UNASSIGNED_ARTICLES",
            format!("{} article(s) belong to no community", unassigned.len()),
        );
        issue.nodes = unassigned;
        report.info.push(issue);
    }

    report
}

// ============================================================================
// Tests
// ============================================================================
