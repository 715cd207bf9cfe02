use crate::state::AppState;
use mockdock_domain::container::ContainerStatus;
use std::io::Write;
use tracing::info;

/// Removes stopped containers, then every image no remaining container
/// references by `name:tag`.
///
/// The two catalogs are locked separately. A container created between
/// the usage snapshot and the image removals can end up pointing at an
/// image that was just pruned.
pub fn handle(state: &AppState, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut removed_containers = 0;
    for container in state.containers.list() {
        if *container.status() == ContainerStatus::Stopped
            && state.containers.remove(container.id())?
        {
            removed_containers += 1;
        }
    }

    let in_use = state.containers.images_in_use();

    let mut removed_images = 0;
    for image in state.images.list() {
        if !in_use.contains(&image.reference()) && state.images.remove(&image.id)? {
            removed_images += 1;
        }
    }

    info!(removed_containers, removed_images, "Prune finished");
    writeln!(out, "Pruned {removed_containers} containers and {removed_images} images")?;
    Ok(())
}
