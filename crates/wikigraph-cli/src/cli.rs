//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level arguments for the `wikigraph` binary.
#[derive(Parser, Debug)]
#[command(name = "wikigraph", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "WIKIGRAPH_CONFIG")]
    pub config: Option<String>,

    /// Graph document to load, overriding `graph.path`.
    #[arg(short, long)]
    pub graph: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// All `wikigraph` commands.
///
/// Numeric options accept negative values so that range checking happens in
/// the facade and produces an `INVALID_ARGUMENT` body.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print version information.
    Version,

    /// Load the graph and print its sizes.
    Health,

    /// Report soft issues in the graph.
    Validate,

    /// Show node and edge counts.
    Stats,

    /// Shortest citation path between two articles.
    Path {
        /// Source article id.
        #[arg(long)]
        from: String,

        /// Target article id.
        #[arg(long)]
        to: String,

        /// Maximum number of hops.
        #[arg(long, allow_negative_numbers = true)]
        max_depth: Option<i64>,
    },

    /// Related articles for one article.
    Recommend {
        /// Source article id.
        #[arg(long)]
        id: String,

        /// Maximum number of results.
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// community, references or hybrid.
        #[arg(long)]
        strategy: Option<String>,
    },

    /// Counts, hubs and community summaries.
    Analytics {
        /// Number of hubs and communities to list.
        #[arg(long, allow_negative_numbers = true)]
        top_n: Option<i64>,
    },

    /// Articles with overlapping citation neighbourhoods.
    Similar {
        /// Source article id.
        #[arg(long)]
        id: String,

        /// Maximum number of results.
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Minimum Jaccard similarity, between 0 and 1.
        #[arg(long, allow_negative_numbers = true)]
        cutoff: Option<f64>,
    },

    /// Rank articles by PageRank over citations.
    Pagerank {
        /// Iteration count.
        #[arg(long, allow_negative_numbers = true)]
        iterations: Option<i64>,

        /// Damping factor in (0, 1].
        #[arg(long, allow_negative_numbers = true)]
        damping: Option<f64>,

        /// Maximum number of results.
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Statistics for one community.
    Community {
        /// Community id.
        #[arg(long)]
        id: String,
    },

    /// Export a community's members and citation edges.
    Subgraph {
        /// Community id.
        #[arg(long)]
        id: String,

        /// Include edges that leave the community.
        #[arg(long)]
        cross_edges: bool,
    },

    /// Show one node.
    Node {
        /// Node id.
        #[arg(long)]
        id: String,
    },

    /// List the edges of one node.
    Relationships {
        /// Node id.
        #[arg(long)]
        id: String,

        /// out, in or both.
        #[arg(long)]
        direction: Option<String>,
    },

    /// Find nodes by title or name.
    Search {
        /// Case-insensitive substring.
        term: String,

        /// Maximum number of results.
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "query.max_limit").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "graph.path").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
