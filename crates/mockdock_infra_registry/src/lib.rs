pub mod auth;
pub mod error;

pub use auth::{AuthConfig, CredentialStore, DEFAULT_SERVER};
pub use error::RegistryError;
