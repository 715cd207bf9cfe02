//! Registry credentials kept in a docker-style `config.json`.
//!
//! Only bookkeeping happens here: `login` records a credential and `pull`
//! asks whether one exists. No registry is ever contacted.

use crate::error::RegistryError;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub const DEFAULT_SERVER: &str = "https://index.docker.io/v1/";

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    // Entries written by other tools may carry any shape; they still count.
    #[serde(default)]
    pub auths: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AuthConfig, RegistryError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AuthConfig::default()),
            Err(source) => {
                return Err(RegistryError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&data).map_err(|source| RegistryError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Records `username:password` for `server`, replacing any previous entry.
    pub fn login(&self, server: &str, username: &str, password: &str) -> Result<(), RegistryError> {
        if username.is_empty() {
            return Err(RegistryError::MissingUsername(server.to_string()));
        }

        let mut config = self.load()?;
        let auth = BASE64_STANDARD.encode(format!("{username}:{password}"));
        config
            .auths
            .insert(server.to_string(), serde_json::json!({ "auth": auth }));
        self.write(&config)?;

        info!(server, username, "Credentials stored");
        Ok(())
    }

    /// True when any stored server key contains `registry`, so `ghcr.io`
    /// matches both `ghcr.io` and `https://ghcr.io/v2/`.
    pub fn is_authenticated(&self, registry: &str) -> bool {
        match self.load() {
            Ok(config) => config.auths.keys().any(|server| server.contains(registry)),
            Err(e) => {
                warn!(error = %e, "Unable to read registry credentials");
                false
            }
        }
    }

    /// Like [`is_authenticated`](Self::is_authenticated) but as a `Result`
    /// for callers that want to bail.
    pub fn require(&self, registry: &str) -> Result<(), RegistryError> {
        if self.is_authenticated(registry) {
            Ok(())
        } else {
            Err(RegistryError::NotAuthenticated(registry.to_string()))
        }
    }

    /// The username stored for exactly `server`, if its `auth` field decodes.
    pub fn username(&self, server: &str) -> Option<String> {
        let config = self.load().ok()?;
        let encoded = config.auths.get(server)?.get("auth")?.as_str()?;
        let decoded = BASE64_STANDARD.decode(encoded).ok()?;
        let text = String::from_utf8(decoded).ok()?;
        text.split_once(':').map(|(user, _)| user.to_string())
    }

    fn write(&self, config: &AuthConfig) -> Result<(), RegistryError> {
        let data = serde_json::to_vec_pretty(config)?;
        let io_err = |source| RegistryError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(io_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(&data).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}
