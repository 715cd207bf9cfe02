pub mod layout;
pub mod store;

pub use layout::StorageLayout;
pub use store::container::ContainerCatalog;
pub use store::error::CatalogError;
pub use store::image::ImageCatalog;
