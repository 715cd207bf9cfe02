pub mod status;
pub mod store;

pub use status::ContainerStatus;
pub use store::ContainerStore;

use serde::{Deserialize, Serialize};

/// A simulated container record.
///
/// `image` is the `name:tag` it was started from; nothing checks that the
/// image still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    id: String,
    name: String,
    image: String,
    status: ContainerStatus,
}

impl Container {
    /// New containers start out running.
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            status: ContainerStatus::Running,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn status(&self) -> &ContainerStatus {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == ContainerStatus::Running
    }

    // Any transition is allowed, including to the current status.
    pub fn set_status(&mut self, status: ContainerStatus) {
        self.status = status;
    }

    pub fn answers_to(&self, identifier: &str) -> bool {
        self.id == identifier || self.name == identifier
    }
}
