pub mod r#ref;
pub mod store;

pub use r#ref::{ImageRef, RefError, DEFAULT_TAG};
pub use store::ImageStore;

use serde::{Deserialize, Serialize};

/// A catalogued image. `(name, tag)` is the identity key; `id` is assigned
/// once by the catalog and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,
    pub tag: String,
}

impl Image {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// `name:tag`, the form containers record as their image.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.name, self.tag)
    }

    pub fn is(&self, name: &str, tag: &str) -> bool {
        self.name == name && self.tag == tag
    }

    /// Like [`is`](Self::is) but a queried tag of `latest` accepts any stored tag.
    pub fn matches_loosely(&self, name: &str, tag: &str) -> bool {
        self.name == name && (self.tag == tag || tag == DEFAULT_TAG)
    }

    /// Identifier match used by removal: the ID, the bare name, or `name:tag`.
    pub fn answers_to(&self, identifier: &str) -> bool {
        self.id == identifier || self.name == identifier || self.reference() == identifier
    }
}
