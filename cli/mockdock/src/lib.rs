//! Docker-style command layer over the image and container catalogs.
//!
//! Handlers print their own results; the catalogs never write to stdout.

pub mod cli;
pub mod commands;
pub mod progress;
pub mod state;

pub use cli::{Cli, Command};
pub use state::AppState;

use std::io::{BufRead, Write};

/// Runs one parsed command against `state`.
pub fn execute(
    state: &AppState,
    command: Command,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Pull(args) => commands::pull::handle(state, &args, out),
        Command::Push(args) => commands::push::handle(state, &args, out),
        Command::Build(args) => commands::build::handle(state, &args, input, out),
        Command::Run(args) => commands::run::handle(state, &args, out),
        Command::Start(args) => commands::start::handle(state, &args, out),
        Command::Stop(args) => commands::stop::handle(state, &args, out),
        Command::Rm(args) => commands::rm::handle(state, &args, out),
        Command::Rmi(args) => commands::rmi::handle(state, &args, out),
        Command::Ps(args) => commands::ps::handle(state, &args, out),
        Command::Images(args) => commands::images::handle(state, &args, out),
        Command::Tag(args) => commands::tag::handle(state, &args, out),
        Command::Prune => commands::prune::handle(state, out),
        Command::Login(args) => commands::login::handle(state, &args, input, out),
        Command::Exec(args) => commands::exec::handle(state, &args, out),
    }
}
