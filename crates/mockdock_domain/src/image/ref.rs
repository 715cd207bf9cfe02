use mockdock_common::diagnostic::Diagnosable;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TAG: &str = "latest";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RefError {
    #[error("Image reference is empty")]
    Empty,
    #[error("Image reference '{0}' has no repository name")]
    MissingName(String),
}

impl Diagnosable for RefError {
    fn code(&self) -> String {
        match self {
            Self::Empty => "IMAGE_REF_EMPTY".to_string(),
            Self::MissingName(_) => "IMAGE_REF_NO_NAME".to_string(),
        }
    }
    fn suggestion(&self) -> Option<String> {
        Some("Use the form NAME[:TAG], e.g. alpine:3.19".to_string())
    }
}

/// A `name[:tag]` reference as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub name: String,
    pub tag: String,
}

impl ImageRef {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Splits on the last `:` unless what follows contains a `/`, so
    /// `localhost:5000/app` keeps its port and gets the default tag.
    pub fn parse(reference: &str) -> Result<Self, RefError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(RefError::Empty);
        }

        let (name, tag) = match reference.rsplit_once(':') {
            Some((name, tag)) if !tag.contains('/') => (name, tag),
            _ => (reference, ""),
        };

        if name.is_empty() {
            return Err(RefError::MissingName(reference.to_string()));
        }

        let tag = if tag.is_empty() { DEFAULT_TAG } else { tag };
        Ok(Self::new(name, tag))
    }
}

impl FromStr for ImageRef {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}
