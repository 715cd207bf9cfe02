use crate::cli::RmiArgs;
use crate::state::AppState;
use std::io::Write;

pub fn handle(state: &AppState, args: &RmiArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    for identifier in &args.images {
        if state.images.remove(identifier)? {
            writeln!(out, "Removed image '{identifier}'")?;
        } else {
            writeln!(out, "No such image: '{identifier}'")?;
        }
    }
    Ok(())
}
