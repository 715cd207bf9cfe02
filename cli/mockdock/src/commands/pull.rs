use crate::cli::PullArgs;
use crate::progress::{self, Progress};
use crate::state::AppState;
use mockdock_common::diagnostic::Error;
use mockdock_domain::image::ImageRef;
use std::io::Write;
use tracing::info;

const GHCR: &str = "ghcr.io";

pub fn handle(state: &AppState, args: &PullArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let reference = ImageRef::parse(&args.image).map_err(Error::new)?;
    info!(image = %reference, "Received pull request");

    if reference.name.starts_with("ghcr.io/") {
        state.credentials.require(GHCR).map_err(Error::new)?;
        writeln!(out, "Using GitHub authentication for {}", reference.name)?;
    }

    // push() doubles as the exact (name, tag) existence check
    if state.images.push(&reference.name, &reference.tag) {
        writeln!(out, "{}: Pulling from {}", reference.tag, reference.name)?;
        writeln!(out, "Status: Image is up to date for {reference}")?;
    } else {
        let mut progress = Progress::new(out, state.config.progress_delay);
        progress::simulate_pull(&mut progress, &reference.name, &reference.tag)?;
    }

    let image = state.images.pull(&reference.name, &reference.tag)?;
    writeln!(
        out,
        "Successfully pulled image '{}' (ID: {})",
        image.reference(),
        image.id
    )?;
    Ok(())
}
