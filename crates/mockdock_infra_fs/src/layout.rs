use crate::store::error::CatalogError;
use std::path::{Path, PathBuf};

pub const IMAGES_FILE: &str = "images.json";
pub const CONTAINERS_FILE: &str = "containers.json";
pub const CONFIG_DIR: &str = "config";
pub const CREDENTIALS_FILE: &str = "config.json";

/// Fixed file layout under the storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory if it does not exist yet.
    pub fn ensure(&self) -> Result<(), CatalogError> {
        std::fs::create_dir_all(&self.root).map_err(|source| CatalogError::Write {
            path: self.root.clone(),
            source,
        })
    }

    pub fn images_file(&self) -> PathBuf {
        self.root.join(IMAGES_FILE)
    }

    pub fn containers_file(&self) -> PathBuf {
        self.root.join(CONTAINERS_FILE)
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir().join(CREDENTIALS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn files_live_directly_under_root() {
        let layout = StorageLayout::new("/var/lib/mockdock");
        assert_eq!(layout.images_file(), PathBuf::from("/var/lib/mockdock/images.json"));
        assert_eq!(layout.containers_file(), PathBuf::from("/var/lib/mockdock/containers.json"));
        assert_eq!(
            layout.credentials_file(),
            PathBuf::from("/var/lib/mockdock/config/config.json")
        );
    }

    #[test]
    fn ensure_creates_nested_root() {
        let tmp = TempDir::new().unwrap();
        let layout = StorageLayout::new(tmp.path().join("a/b/mock-docker"));
        layout.ensure().unwrap();
        assert!(layout.root().is_dir());
        // idempotent
        layout.ensure().unwrap();
    }
}
