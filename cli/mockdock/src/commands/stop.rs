use crate::cli::ContainerArgs;
use crate::state::AppState;
use mockdock_domain::container::ContainerStatus;
use std::io::Write;

// Stopping an already stopped container is reported as a success.
pub fn handle(state: &AppState, args: &ContainerArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    for identifier in &args.containers {
        if state
            .containers
            .set_status(identifier, ContainerStatus::Stopped)?
        {
            writeln!(out, "Stopped container '{identifier}'")?;
        } else {
            writeln!(out, "No such container: '{identifier}'")?;
        }
    }
    Ok(())
}
