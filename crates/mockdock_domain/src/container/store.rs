use super::{Container, ContainerStatus};
use crate::Result;
use std::collections::BTreeSet;

/// The container catalog contract.
///
/// Identifiers are either a container ID or a container name.
pub trait ContainerStore: Send + Sync {
    /// Always inserts a new running record, even for a repeated name/image pair.
    fn create(&self, name: &str, image: &str) -> Result<Container>;
    fn get(&self, identifier: &str) -> Option<Container>;
    fn list(&self) -> Vec<Container>;
    fn remove(&self, identifier: &str) -> Result<bool>;
    /// `Ok(false)` when nothing matches `identifier`.
    fn set_status(&self, identifier: &str, status: ContainerStatus) -> Result<bool>;

    /// `name:tag` references held by any container, whatever its status.
    fn images_in_use(&self) -> BTreeSet<String> {
        self.list().into_iter().map(|c| c.image).collect()
    }
}
