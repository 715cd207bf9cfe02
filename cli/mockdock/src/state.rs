use mockdock_common::config::EngineConfig;
use mockdock_common::diagnostic::Error;
use mockdock_domain::container::ContainerStore;
use mockdock_domain::image::ImageStore;
use mockdock_infra_fs::{ContainerCatalog, ImageCatalog, StorageLayout};
use mockdock_infra_registry::CredentialStore;
use std::sync::Arc;

/// Everything a command handler needs, built once per process.
#[derive(Clone)]
pub struct AppState {
    pub images: Arc<dyn ImageStore>,
    pub containers: Arc<dyn ContainerStore>,
    pub credentials: Arc<CredentialStore>,
    pub config: EngineConfig,
}

impl AppState {
    /// Creates the storage root and loads both catalogs from it.
    pub fn open(config: EngineConfig) -> anyhow::Result<Self> {
        let layout = StorageLayout::new(&config.storage_root);
        layout.ensure().map_err(Error::new)?;

        Ok(Self {
            images: Arc::new(ImageCatalog::open(layout.images_file())),
            containers: Arc::new(ContainerCatalog::open(layout.containers_file())),
            credentials: Arc::new(CredentialStore::new(layout.credentials_file())),
            config,
        })
    }
}
