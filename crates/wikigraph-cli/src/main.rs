//! `wikigraph` binary entry point.

use clap::Parser;
use std::process::ExitCode;
use wikigraph_cli::handlers::error_body;
use wikigraph_cli::{CliArgs, WikigraphCli};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match WikigraphCli::launch("wikigraph", args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_body(&err));
            ExitCode::FAILURE
        }
    }
}
