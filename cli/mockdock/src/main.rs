use clap::Parser;
use mockdock::{AppState, Cli};
use mockdock_common::config::EngineConfig;
use mockdock_common::diagnostic;
use mockdock_common::telemetry;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let directive = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    if let Err(e) = telemetry::init_tracing("mockdock", directive) {
        eprintln!("Warning: {e}");
    }

    let mut config = EngineConfig::from_env();
    if let Some(root) = cli.root {
        config = config.with_storage_root(root);
    }
    tracing::debug!(?config, "Configuration resolved");

    match run(config, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: EngineConfig, command: mockdock::Command) -> anyhow::Result<()> {
    let state = AppState::open(config)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();
    mockdock::execute(&state, command, &mut input, &mut out)
}

fn report(error: &anyhow::Error) {
    // a diagnostic error already carries its source in the message
    match error.downcast_ref::<diagnostic::Error>() {
        Some(diag) => {
            eprintln!("Error: {diag}");
            if let Some(hint) = diag.suggestion() {
                eprintln!("Hint: {hint}");
            }
        }
        None => eprintln!("Error: {error:#}"),
    }
}
