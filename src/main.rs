//! LazyDeploy CLI - deploy only the files changed since the last deploy
//!
//! Usage: lazy [--reset] [-v...] [--color <WHEN>]

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lazydeploy::config;
use lazydeploy::presentation::{create_deploy_use_case, Cli};
use lazydeploy::DeployOutcome;

mod ui;

use ui::console::ConsoleEventSink;
use ui::context::UiContext;
use ui::output::{print_config_warnings, print_error};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let ui = UiContext::new(cli.verbose, cli.color);
    match run(&cli, ui) {
        Ok(outcome) if outcome.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            print_error(&e, ui);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so they never interleave with deploy output.
fn init_tracing(cli: &Cli) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| cli.log_filter().into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli, ui: UiContext) -> Result<DeployOutcome> {
    let project_root =
        std::env::current_dir().context("could not determine the current directory")?;

    let (config, warnings) = config::load_for_project(&project_root)?;
    print_config_warnings(&warnings, ui);

    let use_case = create_deploy_use_case(&project_root, &config)?;
    let sink = Arc::new(ConsoleEventSink::new(ui));

    let outcome = if cli.reset {
        use_case.reset_with_events(sink)?
    } else {
        use_case.execute_with_events(sink)?
    };
    Ok(outcome)
}
