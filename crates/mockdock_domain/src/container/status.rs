use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Lifecycle status, persisted as a bare lowercase string.
///
/// Only `running` and `stopped` are produced today. Any other string read
/// from disk is carried through as [`ContainerStatus::Other`] and written
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContainerStatus {
    Running,
    Stopped,
    Other(String),
}

impl ContainerStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for ContainerStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "running" => Self::Running,
            "stopped" => Self::Stopped,
            _ => Self::Other(s),
        }
    }
}

impl From<ContainerStatus> for String {
    fn from(status: ContainerStatus) -> Self {
        match status {
            ContainerStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ContainerStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
