//! JSON-backed container catalog. Same locking and persistence rules as
//! the image catalog; containers are never deduplicated.

use super::error::CatalogError;
use super::snapshot::SnapshotFile;
use mockdock_common::diagnostic::Error;
use mockdock_common::Result;
use mockdock_domain::container::{Container, ContainerStatus, ContainerStore};
use mockdock_domain::sequence::{Sequence, CONTAINER_ID_PREFIX};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

struct Inner {
    containers: BTreeMap<String, Container>,
    sequence: Sequence,
}

impl Inner {
    /// Exact ID first, then the lowest ID carrying `identifier` as its name.
    fn resolve(&self, identifier: &str) -> Option<String> {
        if self.containers.contains_key(identifier) {
            return Some(identifier.to_string());
        }
        self.containers
            .values()
            .find(|c| c.answers_to(identifier))
            .map(|c| c.id().to_string())
    }
}

pub struct ContainerCatalog {
    file: SnapshotFile,
    inner: Mutex<Inner>,
}

impl ContainerCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: SnapshotFile::new(path),
            inner: Mutex::new(Inner {
                containers: BTreeMap::new(),
                sequence: Sequence::new(CONTAINER_ID_PREFIX),
            }),
        }
    }

    pub fn open(path: impl Into<PathBuf>) -> Self {
        let catalog = Self::new(path);
        match catalog.load() {
            Ok(count) => info!(path = %catalog.path().display(), count, "Container catalog loaded"),
            Err(e) => warn!(
                path = %catalog.path().display(),
                error = %e,
                "Unable to load containers data, starting with an empty catalog"
            ),
        }
        catalog
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn load(&self) -> std::result::Result<usize, CatalogError> {
        let mut inner = self.lock();
        inner.containers.clear();

        let Some(records) = self.file.read::<Container>()? else {
            debug!(path = %self.path().display(), "No containers file yet");
            return Ok(0);
        };

        for container in records {
            inner.sequence.observe(container.id());
            if let Some(previous) = inner
                .containers
                .insert(container.id().to_string(), container)
            {
                warn!(id = %previous.id(), "Duplicate container ID in catalog file, keeping the last entry");
            }
        }
        Ok(inner.containers.len())
    }

    pub fn save(&self) -> std::result::Result<(), CatalogError> {
        let inner = self.lock();
        self.persist(&inner)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, inner: &Inner) -> std::result::Result<(), CatalogError> {
        let records: Vec<&Container> = inner.containers.values().collect();
        self.file.write(&records)
    }
}

impl ContainerStore for ContainerCatalog {
    fn create(&self, name: &str, image: &str) -> Result<Container> {
        let mut inner = self.lock();

        let Some(id) = inner.sequence.allocate() else {
            warn!(path = %self.path().display(), name, image, "Container IDs exhausted");
            return Err(Error::new(CatalogError::IdsExhausted {
                path: self.path().to_path_buf(),
                prefix: CONTAINER_ID_PREFIX,
            }));
        };
        let container = Container::new(id.clone(), name, image);
        inner.containers.insert(id, container.clone());
        info!(id = %container.id(), name, image, "Container created");

        self.persist(&inner).map_err(Error::new)?;
        Ok(container)
    }

    fn get(&self, identifier: &str) -> Option<Container> {
        let inner = self.lock();
        inner
            .resolve(identifier)
            .and_then(|id| inner.containers.get(&id).cloned())
    }

    fn list(&self) -> Vec<Container> {
        self.lock().containers.values().cloned().collect()
    }

    fn remove(&self, identifier: &str) -> Result<bool> {
        let mut inner = self.lock();

        let Some(id) = inner.resolve(identifier) else {
            return Ok(false);
        };
        inner.containers.remove(&id);
        info!(id = %id, identifier, "Container removed");

        self.persist(&inner).map_err(Error::new)?;
        Ok(true)
    }

    fn set_status(&self, identifier: &str, status: ContainerStatus) -> Result<bool> {
        let mut inner = self.lock();

        let Some(id) = inner.resolve(identifier) else {
            debug!(identifier, "Status update for unknown container");
            return Ok(false);
        };
        let Some(container) = inner.containers.get_mut(&id) else {
            return Ok(false);
        };
        container.set_status(status);
        info!(id = %id, status = %container.status(), "Container status updated");

        self.persist(&inner).map_err(Error::new)?;
        Ok(true)
    }
}
