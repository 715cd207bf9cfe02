use mockdock_common::diagnostic::Diagnosable;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("A username is required to log in to {0}")]
    MissingUsername(String),
    #[error("Not authenticated to {0}")]
    NotAuthenticated(String),
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Credentials file {} is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode credentials: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Diagnosable for RegistryError {
    fn code(&self) -> String {
        match self {
            Self::MissingUsername(_) => "REG_MISSING_USERNAME".to_string(),
            Self::NotAuthenticated(_) => "REG_AUTH_REQUIRED".to_string(),
            Self::Io { .. } => "FS_IO_ERROR".to_string(),
            Self::Malformed { .. } => "REG_CONFIG_MALFORMED".to_string(),
            Self::Encode(_) => "REG_CONFIG_ENCODE_FAILED".to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Self::MissingUsername(_) => Some("Pass --username or type one at the prompt".to_string()),
            Self::NotAuthenticated(registry) => Some(format!("Run 'mockdock login {registry}' first")),
            Self::Malformed { path, .. } => Some(format!("Fix or delete {}", path.display())),
            _ => None,
        }
    }
}
