use crate::cli::ContainerArgs;
use crate::state::AppState;
use mockdock_domain::container::ContainerStatus;
use std::io::Write;

pub fn handle(state: &AppState, args: &ContainerArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    for identifier in &args.containers {
        if state
            .containers
            .set_status(identifier, ContainerStatus::Running)?
        {
            writeln!(out, "Started container '{identifier}'")?;
        } else {
            writeln!(out, "No such container: '{identifier}'")?;
        }
    }
    Ok(())
}
