use super::{Image, ImageRef};
use crate::Result;

/// The image catalog contract command handlers program against.
///
/// Mutating calls persist before returning. `Err` means the snapshot
/// write failed; the in-memory change is kept regardless.
pub trait ImageStore: Send + Sync {
    /// Returns the existing record for `(name, tag)` or creates one.
    fn pull(&self, name: &str, tag: &str) -> Result<Image>;
    /// Same catalog effect as [`pull`](Self::pull).
    fn build(&self, name: &str, tag: &str) -> Result<Image>;
    /// Exact existence check; never mutates.
    fn push(&self, name: &str, tag: &str) -> bool;
    /// Renames the source record to `target`, keeping its ID.
    /// `Ok(false)` when the source does not exist.
    fn tag(&self, source: &ImageRef, target: &ImageRef) -> Result<bool>;
    fn remove(&self, identifier: &str) -> Result<bool>;
    fn list(&self) -> Vec<Image>;
    fn exists(&self, name: &str, tag: &str) -> bool;
    fn get(&self, name: &str, tag: &str) -> Option<Image>;
    /// Resolves a run-style reference: exact `(name, tag)`, or an image ID
    /// given in place of the name.
    fn find(&self, reference: &ImageRef) -> Option<Image>;
}
