use crate::cli::BuildArgs;
use crate::commands::prompt;
use crate::progress::Progress;
use crate::state::AppState;
use mockdock_build::BuildContext;
use mockdock_common::diagnostic::Error;
use mockdock_domain::image::ImageRef;
use std::io::{BufRead, Write};
use tracing::{info, warn};

const SCRATCH: &str = "scratch";

pub fn handle(
    state: &AppState,
    args: &BuildArgs,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let ctx = BuildContext::open(&args.path)?;

    let requested = match &args.tag {
        Some(tag) => tag.clone(),
        None => prompt(input, out, "Enter image name (e.g., myapp:1.0): ")?,
    };
    let reference = ImageRef::parse(&requested).map_err(Error::new)?;
    let name = reference.name.to_lowercase();
    let tag = reference.tag;

    info!(
        context = %ctx.context_dir.display(),
        name = %name,
        tag = %tag,
        no_cache = args.no_cache,
        "Received build request"
    );

    for base in ctx.base_images() {
        if base == SCRATCH {
            continue;
        }
        let base_ref = ImageRef::parse(base).map_err(Error::new)?;
        if state.images.exists(&base_ref.name, &base_ref.tag) {
            continue;
        }
        if args.pull {
            let pulled = state.images.pull(&base_ref.name, &base_ref.tag)?;
            writeln!(out, "Pulled base image {} (ID: {})", pulled.reference(), pulled.id)?;
        } else {
            warn!(base = %base_ref, "Base image not present locally");
            writeln!(out, "Warning: base image '{base_ref}' not found locally")?;
        }
    }

    let total = ctx.commands.len();
    {
        let mut progress = Progress::new(out, state.config.progress_delay);
        for (i, command) in ctx.commands.iter().enumerate() {
            progress.line(format_args!(
                "Step {}/{} : {} {}",
                i + 1,
                total,
                command.instruction,
                command.arguments
            ))?;
        }
    }

    let image = state.images.build(&name, &tag)?;
    writeln!(out, "Successfully built {}:{} (ID: {})", image.name, image.tag, image.id)?;
    writeln!(out, "You can run the image with: mockdock run {}:{}", image.name, image.tag)?;
    Ok(())
}
