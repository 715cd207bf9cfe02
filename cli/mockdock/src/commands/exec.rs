use crate::cli::ExecArgs;
use crate::state::AppState;
use std::io::Write;

pub fn handle(state: &AppState, args: &ExecArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let Some(container) = state.containers.get(&args.container) else {
        writeln!(out, "No such container: '{}'", args.container)?;
        return Ok(());
    };

    if !container.is_running() {
        writeln!(
            out,
            "Cannot exec in container '{}' as it is {}",
            args.container,
            container.status()
        )?;
        return Ok(());
    }

    writeln!(
        out,
        "Executing command '[{}]' in container '{}'",
        args.command.join(" "),
        args.container
    )?;
    Ok(())
}
