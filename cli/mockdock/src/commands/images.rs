use crate::cli::ListArgs;
use crate::commands::write_table;
use crate::state::AppState;
use std::io::Write;

pub fn handle(state: &AppState, args: &ListArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let images = state.images.list();

    if args.quiet {
        for img in &images {
            writeln!(out, "{}", img.id)?;
        }
        return Ok(());
    }

    let rows: Vec<Vec<String>> = images
        .into_iter()
        .map(|img| vec![img.id, img.name, img.tag])
        .collect();
    write_table(out, &["IMAGE ID", "REPOSITORY", "TAG"], &rows)?;
    Ok(())
}
