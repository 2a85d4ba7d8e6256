//! Article recommendations.
//!
//! Three strategies share one scoring pass:
//!
//! - **community**: every other article in the source's community scores
//!   `weights.community`
//! - **references**: an article `B` that cites something the source also
//!   cites (`source -> C <- B` over `REFERS_TO` / `LINKS_TO`) scores
//!   `weights.reference` per distinct shared `C`
//! - **hybrid**: the sum of both, with reasons from each
//!
//! Results are ordered by score descending, then id ascending, and never
//! include the source article.

use crate::context::QueryContext;
use crate::store::GraphStore;
use crate::types::Direction;
use log::debug;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use wikigraph_core::{Error, Result};

// ============================================================================
// Types
// ============================================================================

/// Recommendation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Articles in the same community.
    #[default]
    Community,
    /// Articles sharing citation targets.
    References,
    /// Community and references combined.
    Hybrid,
}

impl Strategy {
    /// Wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Community => "community",
            Strategy::References => "references",
            Strategy::Hybrid => "hybrid",
        }
    }

    fn uses_community(&self) -> bool {
        matches!(self, Strategy::Community | Strategy::Hybrid)
    }

    fn uses_references(&self) -> bool {
        matches!(self, Strategy::References | Strategy::Hybrid)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "community" => Ok(Strategy::Community),
            "references" => Ok(Strategy::References),
            "hybrid" => Ok(Strategy::Hybrid),
            _ => Err(Error::invalid_strategy(format!(
                "'{s}' (expected community, references or hybrid)"
            ))),
        }
    }
}

/// Per-signal score weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationWeights {
    /// Score for sharing the source's community.
    pub community: f64,
    /// Score per shared citation target.
    pub reference: f64,
}

impl Default for RecommendationWeights {
    fn default() -> Self {
        Self {
            community: 1.0,
            reference: 1.0,
        }
    }
}

/// Why an article was recommended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// In the same community as the source.
    SameCommunity,
    /// Cites at least one article the source cites.
    SharedReferences,
}

/// A single recommended article.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Article id.
    pub id: String,
    /// Article title, if present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Combined score.
    pub score: f64,
    /// Contributing signals, in the order they were applied.
    pub reasons: Vec<Reason>,
    /// Number of distinct shared citation targets.
    pub shared_references: usize,
}

#[derive(Default)]
struct Candidate {
    score: f64,
    reasons: Vec<Reason>,
    shared_references: usize,
}

// ============================================================================
// Scoring
// ============================================================================

/// Recommend up to `limit` articles related to `article_id`.
///
/// # Errors
///
/// - [`Error::NotFound`] if the article does not exist
/// - [`Error::InvalidArgument`] if `limit` is 0
/// - [`Error::Cancelled`] if the context expires while scoring
pub fn recommend(
    store: &GraphStore,
    article_id: &str,
    strategy: Strategy,
    limit: usize,
    weights: &RecommendationWeights,
    ctx: &QueryContext,
) -> Result<Vec<Recommendation>> {
    if limit == 0 {
        return Err(Error::invalid_argument("limit must be at least 1"));
    }
    let source = store.index_of(article_id)?;
    let mut candidates: HashMap<NodeIndex, Candidate> = HashMap::new();

    if strategy.uses_community() {
        score_community(store, source, weights.community, &mut candidates, ctx)?;
    }
    if strategy.uses_references() {
        score_references(store, source, weights.reference, &mut candidates, ctx)?;
    }

    let mut ranked: Vec<Recommendation> = candidates
        .into_iter()
        .map(|(idx, candidate)| {
            let node = store.node_at(idx);
            Recommendation {
                id: node.id.clone(),
                title: node.title().map(str::to_string),
                score: candidate.score,
                reasons: candidate.reasons,
                shared_references: candidate.shared_references,
            }
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    debug!(
        "{strategy} recommendations for {article_id}: {} candidates, returning {}",
        ranked.len(),
        ranked.len().min(limit)
    );
    ranked.truncate(limit);

    Ok(ranked)
}

fn score_community(
    store: &GraphStore,
    source: NodeIndex,
    weight: f64,
    candidates: &mut HashMap<NodeIndex, Candidate>,
    ctx: &QueryContext,
) -> Result<()> {
    let Some(community) = store.community_index_of(source) else {
        return Ok(());
    };
    ctx.check("recommendation")?;
    for member in store.member_indices(community) {
        if member == source {
            continue;
        }
        let candidate = candidates.entry(member).or_default();
        candidate.score += weight;
        candidate.reasons.push(Reason::SameCommunity);
    }
    Ok(())
}

fn score_references(
    store: &GraphStore,
    source: NodeIndex,
    weight: f64,
    candidates: &mut HashMap<NodeIndex, Candidate>,
    ctx: &QueryContext,
) -> Result<()> {
    let mut cited = HashSet::new();
    let mut shared: HashMap<NodeIndex, usize> = HashMap::new();

    for target in store.citation_neighbors(source, Direction::Out) {
        if !cited.insert(target) {
            continue;
        }
        ctx.check("recommendation")?;

        let mut citers = HashSet::new();
        for citer in store.citation_neighbors(target, Direction::In) {
            if citer != source && store.node_at(citer).is_article() && citers.insert(citer) {
                *shared.entry(citer).or_default() += 1;
            }
        }
    }

    for (idx, count) in shared {
        let candidate = candidates.entry(idx).or_default();
        candidate.score += weight * count as f64;
        candidate.reasons.push(Reason::SharedReferences);
        candidate.shared_references = count;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
