use crate::cli::ListArgs;
use crate::commands::write_table;
use crate::state::AppState;
use std::io::Write;

pub fn handle(state: &AppState, args: &ListArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let containers = state.containers.list();

    if args.quiet {
        for c in &containers {
            writeln!(out, "{}", c.id())?;
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = containers
        .iter()
        .map(|c| {
            vec![
                c.id().to_string(),
                c.name().to_string(),
                c.image().to_string(),
                c.status().to_string(),
            ]
        })
        .collect();
    write_table(out, &["CONTAINER ID", "NAME", "IMAGE", "STATUS"], &rows)?;
    Ok(())
}
