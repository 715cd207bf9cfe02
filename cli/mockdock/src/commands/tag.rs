use crate::cli::TagArgs;
use crate::state::AppState;
use mockdock_common::diagnostic::Error;
use mockdock_domain::image::ImageRef;
use std::io::Write;

/// Missing tags on either side default to `latest`. The source record is
/// renamed to the target; it keeps its ID and the source pair disappears.
pub fn handle(state: &AppState, args: &TagArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let source = ImageRef::parse(&args.source).map_err(Error::new)?;
    let target = ImageRef::parse(&args.target).map_err(Error::new)?;

    if state.images.tag(&source, &target)? {
        writeln!(out, "Successfully tagged {source} as {target}")?;
    } else {
        writeln!(out, "Error: No such image: {source}")?;
    }
    Ok(())
}
