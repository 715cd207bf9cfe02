//! JSON-backed image catalog.
//!
//! All state sits behind one mutex. Every mutation rewrites the whole
//! snapshot file before the lock is released, so the file on disk always
//! matches the newest in-memory state once a call returns `Ok`.

use super::error::CatalogError;
use super::snapshot::SnapshotFile;
use mockdock_common::diagnostic::Error;
use mockdock_common::Result;
use mockdock_domain::image::{Image, ImageRef, ImageStore, DEFAULT_TAG};
use mockdock_domain::sequence::{Sequence, IMAGE_ID_PREFIX};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

struct Inner {
    // keyed by image ID
    images: BTreeMap<String, Image>,
    sequence: Sequence,
}

impl Inner {
    fn find_exact(&self, name: &str, tag: &str) -> Option<&Image> {
        self.images.values().find(|img| img.is(name, tag))
    }

    /// An exact ID wins; otherwise the first image (in ID order) whose name
    /// or `name:tag` equals `identifier`.
    fn resolve(&self, identifier: &str) -> Option<String> {
        if self.images.contains_key(identifier) {
            return Some(identifier.to_string());
        }
        self.images
            .values()
            .find(|img| img.answers_to(identifier))
            .map(|img| img.id.clone())
    }
}

pub struct ImageCatalog {
    file: SnapshotFile,
    inner: Mutex<Inner>,
}

impl ImageCatalog {
    /// Builds an empty catalog bound to `path` without touching the disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: SnapshotFile::new(path),
            inner: Mutex::new(Inner {
                images: BTreeMap::new(),
                sequence: Sequence::new(IMAGE_ID_PREFIX),
            }),
        }
    }

    /// Creates the catalog and loads `path`. A missing file yields an empty
    /// catalog; an unreadable or malformed one is logged and also yields an
    /// empty catalog.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let catalog = Self::new(path);
        match catalog.load() {
            Ok(count) => info!(path = %catalog.path().display(), count, "Image catalog loaded"),
            Err(e) => warn!(
                path = %catalog.path().display(),
                error = %e,
                "Unable to load images data, starting with an empty catalog"
            ),
        }
        catalog
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Replaces the in-memory set with the file contents and returns the
    /// number of images loaded. On error the catalog is left empty.
    ///
    /// The ID counter only moves forward: it ends up past both the largest
    /// ID in the file and any ID already handed out by this instance.
    pub fn load(&self) -> std::result::Result<usize, CatalogError> {
        let mut inner = self.lock();
        inner.images.clear();

        let Some(records) = self.file.read::<Image>()? else {
            debug!(path = %self.path().display(), "No images file yet");
            return Ok(0);
        };

        for image in records {
            inner.sequence.observe(&image.id);
            if let Some(previous) = inner.images.insert(image.id.clone(), image) {
                warn!(id = %previous.id, "Duplicate image ID in catalog file, keeping the last entry");
            }
        }
        Ok(inner.images.len())
    }

    /// Writes the current set to disk.
    pub fn save(&self) -> std::result::Result<(), CatalogError> {
        let inner = self.lock();
        self.persist(&inner)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, inner: &Inner) -> std::result::Result<(), CatalogError> {
        let records: Vec<&Image> = inner.images.values().collect();
        self.file.write(&records)
    }

    fn record(&self, name: &str, tag: &str, action: &'static str) -> Result<Image> {
        let mut inner = self.lock();

        if let Some(existing) = inner.find_exact(name, tag) {
            debug!(id = %existing.id, name, tag, action, "Image already exists");
            return Ok(existing.clone());
        }

        let Some(id) = inner.sequence.allocate() else {
            warn!(path = %self.path().display(), name, tag, "Image IDs exhausted");
            return Err(Error::new(CatalogError::IdsExhausted {
                path: self.path().to_path_buf(),
                prefix: IMAGE_ID_PREFIX,
            }));
        };
        let image = Image::new(id.clone(), name, tag);
        inner.images.insert(id, image.clone());
        info!(id = %image.id, name, tag, action, "Image recorded");

        self.persist(&inner).map_err(Error::new)?;
        Ok(image)
    }
}

impl ImageStore for ImageCatalog {
    fn pull(&self, name: &str, tag: &str) -> Result<Image> {
        self.record(name, tag, "pull")
    }

    fn build(&self, name: &str, tag: &str) -> Result<Image> {
        self.record(name, tag, "build")
    }

    fn push(&self, name: &str, tag: &str) -> bool {
        self.lock().find_exact(name, tag).is_some()
    }

    fn tag(&self, source: &ImageRef, target: &ImageRef) -> Result<bool> {
        let mut inner = self.lock();

        let Some(id) = inner
            .find_exact(&source.name, &source.tag)
            .map(|img| img.id.clone())
        else {
            debug!(source = %source, "Tag source not found");
            return Ok(false);
        };

        // (name, tag) stays unique: whatever else held the target is dropped.
        let displaced: Vec<String> = inner
            .images
            .values()
            .filter(|img| img.id != id && img.is(&target.name, &target.tag))
            .map(|img| img.id.clone())
            .collect();
        for other in displaced {
            inner.images.remove(&other);
            info!(id = %other, target = %target, "Image untagged by retag");
        }

        inner
            .images
            .insert(id.clone(), Image::new(id.clone(), &target.name, &target.tag));
        info!(id = %id, source = %source, target = %target, "Image tagged");

        self.persist(&inner).map_err(Error::new)?;
        Ok(true)
    }

    fn remove(&self, identifier: &str) -> Result<bool> {
        let mut inner = self.lock();

        let Some(id) = inner.resolve(identifier) else {
            return Ok(false);
        };
        inner.images.remove(&id);
        info!(id = %id, identifier, "Image removed");

        self.persist(&inner).map_err(Error::new)?;
        Ok(true)
    }

    fn list(&self) -> Vec<Image> {
        self.lock().images.values().cloned().collect()
    }

    fn exists(&self, name: &str, tag: &str) -> bool {
        self.get(name, tag).is_some()
    }

    fn get(&self, name: &str, tag: &str) -> Option<Image> {
        self.lock()
            .images
            .values()
            .find(|img| img.matches_loosely(name, tag))
            .cloned()
    }

    fn find(&self, reference: &ImageRef) -> Option<Image> {
        let inner = self.lock();
        inner
            .find_exact(&reference.name, &reference.tag)
            .or_else(|| {
                inner.images.values().find(|img| {
                    img.id == reference.name
                        && (reference.tag == DEFAULT_TAG || img.tag == reference.tag)
                })
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn catalog(tmp: &TempDir) -> ImageCatalog {
        ImageCatalog::open(tmp.path().join("images.json"))
    }

    #[test]
    fn first_image_gets_i001() {
        let tmp = TempDir::new().unwrap();
        let images = catalog(&tmp);
        let img = images.pull("alpine", "3.19").unwrap();
        assert_eq!(img.id, "i001");
        assert_eq!(images.build("app", "v1").unwrap().id, "i002");
    }

    #[test]
    fn build_is_idempotent_like_pull() {
        let tmp = TempDir::new().unwrap();
        let images = catalog(&tmp);
        let pulled = images.pull("app", "v1").unwrap();
        let built = images.build("app", "v1").unwrap();
        assert_eq!(pulled, built);
        assert_eq!(images.list().len(), 1);
    }

    #[test]
    fn retag_onto_existing_pair_displaces_it() {
        let tmp = TempDir::new().unwrap();
        let images = catalog(&tmp);
        let a = images.pull("app", "v1").unwrap();
        let b = images.pull("app", "v2").unwrap();

        let moved = images
            .tag(&ImageRef::new("app", "v1"), &ImageRef::new("app", "v2"))
            .unwrap();
        assert!(moved);

        let all = images.list();
        assert_eq!(all, vec![Image::new(a.id.clone(), "app", "v2")]);
        assert!(all.iter().all(|img| img.id != b.id));
    }

    #[test]
    fn tag_onto_itself_is_a_successful_no_op() {
        let tmp = TempDir::new().unwrap();
        let images = catalog(&tmp);
        let a = images.pull("app", "v1").unwrap();
        let r = ImageRef::new("app", "v1");
        assert!(images.tag(&r, &r).unwrap());
        assert_eq!(images.list(), vec![a]);
    }

    #[test]
    fn exact_id_beats_name_on_remove() {
        let tmp = TempDir::new().unwrap();
        let images = catalog(&tmp);
        images.pull("i002", "odd").unwrap(); // i001, named like an ID
        images.pull("real", "v1").unwrap(); // i002

        assert!(images.remove("i002").unwrap());
        let left: Vec<String> = images.list().into_iter().map(|i| i.name).collect();
        assert_eq!(left, vec!["i002"]);
    }

    #[test]
    fn find_accepts_id_in_place_of_name() {
        let tmp = TempDir::new().unwrap();
        let images = catalog(&tmp);
        let img = images.pull("nginx", "1.25").unwrap();

        assert_eq!(images.find(&ImageRef::new("nginx", "1.25")), Some(img.clone()));
        assert_eq!(images.find(&ImageRef::new(img.id.clone(), "latest")), Some(img.clone()));
        assert_eq!(images.find(&ImageRef::new(img.id.clone(), "1.25")), Some(img));
        assert_eq!(images.find(&ImageRef::new("nginx", "latest")), None);
    }

    #[test]
    fn save_failure_keeps_memory_state() {
        let tmp = TempDir::new().unwrap();
        // a directory where the file should be makes every write fail
        let path = tmp.path().join("images.json");
        std::fs::create_dir(&path).unwrap();

        let images = ImageCatalog::new(&path);
        let err = images.pull("app", "v1").unwrap_err();
        assert_eq!(err.code(), "CATALOG_WRITE_FAILED");

        assert!(images.push("app", "v1"));
        // second pull is idempotent and therefore does not write
        assert_eq!(images.pull("app", "v1").unwrap().id, "i001");
    }
}
