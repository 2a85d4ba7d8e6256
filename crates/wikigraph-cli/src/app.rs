//! The `wikigraph` application.

use crate::cli::{CliArgs, Command};
use crate::config::WikigraphConfig;
use crate::{config_handlers, handlers};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use wikigraph_core::Result;

/// Loaded configuration plus command dispatch.
pub struct WikigraphCli {
    name: String,
    config: Arc<WikigraphConfig>,
    version: String,
}

impl WikigraphCli {
    /// Create from CLI args, loading config from file/env.
    ///
    /// `--graph` overrides `graph.path`.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let mut config = WikigraphConfig::load(args.config.as_deref())?;
        if let Some(graph) = &args.graph {
            config = config.with_graph_path(graph.clone());
        }
        Ok(Self::new(name, config))
    }

    /// Build the application for `args` and run it.
    ///
    /// `version` and `config` run against defaults so a broken config file
    /// can still be inspected or replaced.
    pub async fn launch(name: impl Into<String>, args: CliArgs) -> Result<()> {
        let cli = match args.command {
            Some(Command::Version | Command::Config(_)) => {
                Self::new(name, WikigraphConfig::default())
            }
            _ => Self::from_args(name, &args)?,
        };
        cli.run(args).await
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: WikigraphConfig) -> Self {
        Self {
            name: name.into(),
            config: Arc::new(config),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &WikigraphConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    /// Records from the library crates' `log` calls are forwarded.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub async fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);
        log::debug!("{} {} running {:?}", self.name, self.version, args.command);

        match args.command {
            Some(Command::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(())
            }
            Some(Command::Health) => handlers::handle_health(&self.config).await,
            Some(Command::Validate) => handlers::handle_validate(&self.config).await,
            Some(Command::Stats) => handlers::handle_stats(&self.config).await,
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            Some(query) => handlers::handle_query(&self.config, &query).await,
            None => {
                println!("{} {}: use --help for usage", self.name, self.version);
                Ok(())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
