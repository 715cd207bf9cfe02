use mockdock_common::diagnostic::Diagnosable;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Catalog file {} is malformed: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No {prefix}-prefixed IDs left for catalog {}", path.display())]
    IdsExhausted { path: PathBuf, prefix: char },
    #[error("Failed to encode catalog snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Diagnosable for CatalogError {
    fn code(&self) -> String {
        match self {
            Self::Read { .. } => "CATALOG_READ_FAILED".to_string(),
            Self::Write { .. } => "CATALOG_WRITE_FAILED".to_string(),
            Self::Corrupt { .. } => "CATALOG_CORRUPT".to_string(),
            Self::IdsExhausted { .. } => "CATALOG_IDS_EXHAUSTED".to_string(),
            Self::Encode(_) => "CATALOG_ENCODE_FAILED".to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Self::Read { .. } | Self::Write { .. } => {
                Some("Check that the storage directory exists and is writable".to_string())
            }
            Self::Corrupt { path, .. } => Some(format!(
                "Fix or delete {}; it will be rewritten on the next change",
                path.display()
            )),
            Self::IdsExhausted { path, .. } => Some(format!(
                "Remove the entry with the largest ID from {}",
                path.display()
            )),
            Self::Encode(_) => None,
        }
    }
}
