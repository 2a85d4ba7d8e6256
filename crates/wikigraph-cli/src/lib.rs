//! Command-line front end for Wikigraph.
//!
//! # Key Abstractions
//!
//! - [`CliArgs`]: clap-derived arguments and subcommands
//! - [`WikigraphConfig`]: TOML/env configuration loaded with `confyg`
//! - [`WikigraphCli`]: loads the graph and dispatches commands to handlers

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod handlers;

pub use app::WikigraphCli;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::{GraphConfig, WikigraphConfig};
