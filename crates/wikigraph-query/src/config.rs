//! Query defaults and limits.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use wikigraph_core::{Error, Result};
use wikigraph_graph::RecommendationWeights;

/// Defaults applied to missing request fields, and the upper bounds
/// requests are validated against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// `max_depth` used when a path request omits it.
    pub default_max_depth: usize,
    /// Largest accepted `max_depth`.
    pub max_depth_limit: usize,
    /// `limit` used when a request omits it.
    pub default_limit: usize,
    /// Largest accepted `limit`.
    pub max_limit: usize,
    /// `top_n` used when an analytics request omits it.
    pub default_top_n: usize,
    /// Largest accepted `top_n`.
    pub max_top_n: usize,
    /// Per-query deadline in milliseconds; unset means no deadline.
    pub timeout_ms: Option<u64>,
    /// Recommendation score weights.
    pub weights: RecommendationWeights,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_max_depth: 5,
            max_depth_limit: 10,
            default_limit: 10,
            max_limit: 50,
            default_top_n: 10,
            max_top_n: 50,
            timeout_ms: None,
            weights: RecommendationWeights::default(),
        }
    }
}

impl QueryConfig {
    /// Deadline duration, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Check that defaults sit inside their limits and weights are usable.
    pub fn validate(&self) -> Result<()> {
        let pairs = [
            ("default_max_depth", self.default_max_depth, "max_depth_limit", self.max_depth_limit),
            ("default_limit", self.default_limit, "max_limit", self.max_limit),
            ("default_top_n", self.default_top_n, "max_top_n", self.max_top_n),
        ];
        for (default_name, default, limit_name, limit) in pairs {
            if default == 0 || default > limit {
                return Err(Error::config(format!(
                    "query.{default_name} ({default}) must be between 1 \
                     and query.{limit_name} ({limit})"
                )));
            }
        }
        if !self.weights.community.is_finite() || !self.weights.reference.is_finite() {
            return Err(Error::config("query.weights must be finite numbers"));
        }
        if self.timeout_ms == Some(0) {
            return Err(Error::config("query.timeout_ms must be positive when set"));
        }
        Ok(())
    }
}
