use crate::cli::PushArgs;
use crate::state::AppState;
use mockdock_common::diagnostic::Error;
use mockdock_domain::image::ImageRef;
use std::io::Write;

pub fn handle(state: &AppState, args: &PushArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let reference = ImageRef::parse(&args.image).map_err(Error::new)?;

    if state.images.push(&reference.name, &reference.tag) {
        writeln!(out, "Successfully pushed image '{reference}'")?;
    } else {
        writeln!(out, "Image '{reference}' not found locally")?;
    }
    Ok(())
}
