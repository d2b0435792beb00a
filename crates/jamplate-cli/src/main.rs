//! Jamplate CLI - compile and execute a template project.

mod args;
mod colors;
mod pipeline;
mod setup;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use jamplate_core::LiteralEngine;
use tracing::{debug, info};

use crate::args::Invocation;
use crate::pipeline::{Outcome, Pipeline};

#[derive(Parser)]
#[command(name = "jamplate")]
#[command(about = "Compile and execute a Jamplate project")]
#[command(version = jamplate_core::VERSION)]
#[command(override_usage = "jamplate [--verbose] <INPUT> [KEY=VALUE]... [-o <OUTPUT>]")]
struct Cli {
    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// Input path, then `key=value` memory entries and `-o <output>`
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let invocation = match Invocation::parse(&cli.args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("{}{}error:{} {}", colors::BOLD, colors::RED, colors::RESET, err);
            return Outcome::ParseFailed.exit_code();
        }
    };

    match run(&invocation) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{}{}error:{} {:#}", colors::BOLD, colors::RED, colors::RESET, err);
            ExitCode::FAILURE
        }
    }
}

fn run(invocation: &Invocation) -> anyhow::Result<Outcome> {
    info!("Input: {}", invocation.input());
    info!("Output: {}", invocation.output());
    if !invocation.default_memory().is_empty() {
        debug!("Memory: {:?}", invocation.default_memory());
    }

    let setup::Prepared {
        mut environment,
        documents,
    } = setup::build(invocation)?;

    let engine = LiteralEngine::new();
    let mut pipeline = Pipeline::new(&engine);
    pipeline
        .run(&mut environment, &documents)
        .context("Failed to write diagnostics")?;

    debug!("Pipeline finished: {:?}", pipeline.stage());
    Ok(Outcome::from(pipeline.stage()))
}
