use crate::cli::ContainerArgs;
use crate::state::AppState;
use std::io::Write;

pub fn handle(state: &AppState, args: &ContainerArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    for identifier in &args.containers {
        if state.containers.remove(identifier)? {
            writeln!(out, "Removed container '{identifier}'")?;
        } else {
            writeln!(out, "No such container: '{identifier}'")?;
        }
    }
    Ok(())
}
